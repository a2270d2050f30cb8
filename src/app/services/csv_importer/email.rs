//! Email address validation for imported rows
//!
//! A cell is accepted when it holds exactly one address: either a bare
//! `local@domain` addr-spec, or an RFC 5322 mailbox such as
//! `Display Name <addr>`, which is parsed with `mailparse`. Only the
//! addr-spec is kept.
//!
//! The addr-spec must follow the RFC 5322 grammar: the local part is a
//! dot-atom or a quoted string, the domain is a dot-atom, and there is
//! exactly one unquoted `@` between them.

use mailparse::{MailAddr, addrparse};

/// Parse a raw email cell, returning the canonical address when valid
pub fn validate_email(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if is_addr_spec(raw) {
        return Some(raw.to_string());
    }

    // `mailparse` drops an empty trailing list entry
    if raw.ends_with([',', ';']) {
        return None;
    }

    let list = addrparse(raw).ok()?;
    let mut addresses = list.iter();
    let (Some(MailAddr::Single(info)), None) = (addresses.next(), addresses.next()) else {
        return None;
    };

    let address = info.addr.trim();
    is_addr_spec(address).then(|| address.to_string())
}

/// Whether `address` is a complete `local@domain` addr-spec
fn is_addr_spec(address: &str) -> bool {
    let Some((local, domain)) = split_addr_spec(address) else {
        return false;
    };

    let local_ok = match local.strip_prefix('"') {
        Some(quoted) => is_quoted_content(quoted.strip_suffix('"').unwrap_or_default()),
        None => is_dot_atom(local),
    };

    local_ok && is_dot_atom(domain)
}

/// Split at the first `@` outside a leading quoted string
fn split_addr_spec(address: &str) -> Option<(&str, &str)> {
    if !address.starts_with('"') {
        return address.split_once('@');
    }

    let mut escaped = false;
    for (index, c) in address.char_indices().skip(1) {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => {
                let (local, rest) = address.split_at(index + 1);
                return rest.strip_prefix('@').map(|domain| (local, domain));
            }
            _ => {}
        }
    }
    None
}

/// One or more atoms joined by single dots
fn is_dot_atom(value: &str) -> bool {
    !value.is_empty()
        && value
            .split('.')
            .all(|atom| !atom.is_empty() && atom.chars().all(is_atext))
}

/// Body of a quoted local part: printable text, spaces, and `\`-escapes
fn is_quoted_content(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }

    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        let allowed = match c {
            '\\' => chars
                .next()
                .is_some_and(|next| matches!(next, ' ' | '\t') || is_vchar(next)),
            '"' => false,
            ' ' | '\t' => true,
            _ => is_vchar(c),
        };
        if !allowed {
            return false;
        }
    }
    true
}

fn is_vchar(c: char) -> bool {
    c.is_ascii_graphic() || (!c.is_ascii() && !c.is_whitespace() && !c.is_control())
}

fn is_atext(c: char) -> bool {
    is_vchar(c)
        && !matches!(
            c,
            '(' | ')' | '<' | '>' | '[' | ']' | ':' | ';' | '@' | '\\' | ',' | '"' | '.'
        )
}
