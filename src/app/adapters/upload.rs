//! Upload part sources
//!
//! The importer pulls parts one at a time from a [`PartSource`]. A part is a
//! human file name plus a readable body; an empty file name marks a plain
//! form field rather than a file. The body is owned by the [`Part`], so
//! dropping the part closes the underlying stream.

use std::collections::VecDeque;
use std::fmt;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::PathBuf;
use tracing::debug;

use crate::{Error, Result};

/// One named sub-stream of a multi-part upload
pub struct Part {
    filename: String,
    body: Box<dyn Read + Send>,
}

impl Part {
    /// Create a part from a file name and any readable body
    pub fn new(filename: impl Into<String>, body: impl Read + Send + 'static) -> Self {
        Self {
            filename: filename.into(),
            body: Box::new(body),
        }
    }

    /// Create a part whose body is an in-memory buffer
    pub fn from_bytes(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(filename, Cursor::new(bytes.into()))
    }

    /// Create a non-file form field part (empty file name)
    pub fn form_field(value: impl Into<Vec<u8>>) -> Self {
        Self::from_bytes(String::new(), value)
    }

    /// Declared file name; empty for form fields
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Whether this part carries a file
    pub fn is_file(&self) -> bool {
        !self.filename.is_empty()
    }

    /// Consume the part, handing ownership of the body stream to the caller
    pub fn into_body(self) -> Box<dyn Read + Send> {
        self.body
    }
}

impl fmt::Debug for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Part")
            .field("filename", &self.filename)
            .finish_non_exhaustive()
    }
}

/// Supplier of upload parts, in upload order
pub trait PartSource {
    /// Return the next part, `Ok(None)` once the upload is exhausted
    fn next_part(&mut self) -> Result<Option<Part>>;
}

impl<S: PartSource + ?Sized> PartSource for &mut S {
    fn next_part(&mut self) -> Result<Option<Part>> {
        (**self).next_part()
    }
}

/// Parts already held in memory
#[derive(Debug, Default)]
pub struct MemoryParts {
    parts: VecDeque<Part>,
}

impl MemoryParts {
    pub fn new(parts: impl IntoIterator<Item = Part>) -> Self {
        Self {
            parts: parts.into_iter().collect(),
        }
    }

    /// Number of parts not yet handed out
    pub fn remaining(&self) -> usize {
        self.parts.len()
    }
}

impl PartSource for MemoryParts {
    fn next_part(&mut self) -> Result<Option<Part>> {
        Ok(self.parts.pop_front())
    }
}

/// Files on disk, each treated as one uploaded file part
///
/// Files are opened only when their part is requested, so at most one
/// descriptor is held at a time while the importer walks the list.
#[derive(Debug, Default)]
pub struct FileParts {
    paths: VecDeque<PathBuf>,
}

impl FileParts {
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            paths: paths.into_iter().collect(),
        }
    }

    /// Number of files not yet opened
    pub fn remaining(&self) -> usize {
        self.paths.len()
    }
}

impl PartSource for FileParts {
    fn next_part(&mut self) -> Result<Option<Part>> {
        let Some(path) = self.paths.pop_front() else {
            return Ok(None);
        };

        let file = File::open(&path)
            .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        debug!("Opened upload part '{}' from {}", filename, path.display());
        Ok(Some(Part::new(filename, file)))
    }
}
