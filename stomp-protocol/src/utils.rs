use crate::ProtocolError;

/// Escapes a header name or value for every frame except CONNECT/CONNECTED.
pub fn escape_header(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            ':' => out.push_str("\\c"),
            other => out.push(other),
        }
    }
    out
}

pub fn unescape_header(raw: &str) -> Result<String, ProtocolError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('c') => out.push(':'),
            Some(other) => {
                return Err(ProtocolError::InvalidHeader(format!(
                    "undefined escape sequence \\{} in {:?}",
                    other, raw
                )))
            }
            None => {
                return Err(ProtocolError::InvalidHeader(format!(
                    "dangling escape in {:?}",
                    raw
                )))
            }
        }
    }
    Ok(out)
}
