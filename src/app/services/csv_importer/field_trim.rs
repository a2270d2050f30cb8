//! Leading whitespace removal ahead of CSV field splitting
//!
//! Whitespace has to go before the CSV reader sees a field, otherwise a
//! field written as `, "Smith, Jr"` is not recognised as quoted and gets
//! split at its inner delimiter. [`TrimLeadingSpace`] wraps a part body and
//! drops whitespace at the start of every field while tracking quotes, so
//! whitespace inside quoted values and in the middle of fields is kept.
//!
//! Line breaks are never dropped because they end records. A delimiter that
//! is itself whitespace is treated as a delimiter.

use std::io::{self, Read};

const CHUNK_SIZE: usize = 8 * 1024;

/// Reader adapter that strips whitespace from the start of each CSV field
pub struct TrimLeadingSpace<R> {
    inner: R,
    scanner: Option<FieldScanner>,
    chunk: Vec<u8>,
    out: Vec<u8>,
    pos: usize,
    eof: bool,
}

impl<R: Read> TrimLeadingSpace<R> {
    /// Wrap `inner`, trimming fields split on `delimiter`
    pub fn new(inner: R, delimiter: u8, quoting: bool) -> Self {
        Self::with_scanner(inner, Some(FieldScanner::new(delimiter, quoting)))
    }

    /// Wrap `inner` without changing any bytes
    pub fn passthrough(inner: R) -> Self {
        Self::with_scanner(inner, None)
    }

    fn with_scanner(inner: R, scanner: Option<FieldScanner>) -> Self {
        Self {
            inner,
            scanner,
            chunk: Vec::new(),
            out: Vec::new(),
            pos: 0,
            eof: false,
        }
    }
}

impl<R: Read> Read for TrimLeadingSpace<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(scanner) = self.scanner.as_mut() else {
            return self.inner.read(buf);
        };

        loop {
            if self.pos < self.out.len() {
                let n = buf.len().min(self.out.len() - self.pos);
                buf[..n].copy_from_slice(&self.out[self.pos..self.pos + n]);
                self.pos += n;
                return Ok(n);
            }
            if self.eof || buf.is_empty() {
                return Ok(0);
            }

            self.out.clear();
            self.pos = 0;
            self.chunk.resize(CHUNK_SIZE, 0);

            let n = self.inner.read(&mut self.chunk)?;
            if n == 0 {
                self.eof = true;
                scanner.finish(&mut self.out);
                continue;
            }
            for &byte in &self.chunk[..n] {
                scanner.feed(byte, &mut self.out);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Before the first byte of a field
    FieldStart,
    /// Inside an unquoted field, or after a quoted section has closed
    Unquoted,
    /// Inside a quoted section
    Quoted,
    /// Just after a quote inside a quoted section
    QuoteInQuoted,
}

/// Byte-at-a-time tracker of field boundaries
#[derive(Debug)]
struct FieldScanner {
    delimiter: u8,
    quoting: bool,
    state: ScanState,
    /// Start of a multi-byte character seen at a field start
    held: Vec<u8>,
}

impl FieldScanner {
    fn new(delimiter: u8, quoting: bool) -> Self {
        Self {
            delimiter,
            quoting,
            state: ScanState::FieldStart,
            held: Vec::with_capacity(4),
        }
    }

    fn feed(&mut self, byte: u8, out: &mut Vec<u8>) {
        if !self.held.is_empty() {
            if is_continuation(byte) {
                self.held.push(byte);
                if self.held.len() == sequence_len(self.held[0]) {
                    self.resolve_held(out);
                }
                return;
            }
            // Malformed sequence: keep the bytes as field content
            out.append(&mut self.held);
            self.state = ScanState::Unquoted;
        }

        match self.state {
            ScanState::FieldStart => self.feed_field_start(byte, out),
            ScanState::Unquoted => {
                self.end_field_on(byte);
                out.push(byte);
            }
            ScanState::Quoted => {
                if byte == b'"' {
                    self.state = ScanState::QuoteInQuoted;
                }
                out.push(byte);
            }
            ScanState::QuoteInQuoted => {
                self.state = if byte == b'"' {
                    ScanState::Quoted
                } else {
                    ScanState::Unquoted
                };
                self.end_field_on(byte);
                out.push(byte);
            }
        }
    }

    fn feed_field_start(&mut self, byte: u8, out: &mut Vec<u8>) {
        match byte {
            _ if byte == self.delimiter || byte == b'\n' || byte == b'\r' => out.push(byte),
            b' ' | b'\t' | b'\x0B' | b'\x0C' => {}
            _ if sequence_len(byte) > 1 => self.held.push(byte),
            b'"' if self.quoting => {
                self.state = ScanState::Quoted;
                out.push(byte);
            }
            _ => {
                self.state = ScanState::Unquoted;
                out.push(byte);
            }
        }
    }

    /// Drop a held character if it is whitespace, otherwise emit it
    fn resolve_held(&mut self, out: &mut Vec<u8>) {
        let is_space = std::str::from_utf8(&self.held)
            .ok()
            .and_then(|s| s.chars().next())
            .is_some_and(char::is_whitespace);

        if is_space {
            self.held.clear();
        } else {
            out.append(&mut self.held);
            self.state = ScanState::Unquoted;
        }
    }

    fn end_field_on(&mut self, byte: u8) {
        if byte == self.delimiter || byte == b'\n' || byte == b'\r' {
            self.state = ScanState::FieldStart;
        }
    }

    fn finish(&mut self, out: &mut Vec<u8>) {
        out.append(&mut self.held);
    }
}

fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Length of the UTF-8 sequence a lead byte starts, 1 for anything else
fn sequence_len(byte: u8) -> usize {
    match byte {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 1,
    }
}
