/*
COMMAND EOL
( header-name ":" header-value EOL )*
EOL
body NUL

EOL = "\n" | "\r\n"
*/

use bytes::{Buf, BufMut, Bytes, BytesMut};
use crate::utils::{escape_header, unescape_header};
use crate::{Command, ProtocolError};

/// Upper bound for a single buffered frame, headers included.
pub const MAX_FRAME_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub command: Command,
    pub headers: Vec<(String, String)>, // Wire order, repeats kept
    pub body: Bytes,
}

impl Frame {
    pub fn new(command: Command) -> Self {
        Frame {
            command,
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Bytes) -> Self {
        self.body = body;
        self
    }

    /// First occurrence wins when a header is repeated.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        let escape = self.command.escapes_headers();

        buf.extend_from_slice(self.command.as_str().as_bytes());
        buf.put_u8(b'\n');
        for (name, value) in &self.headers {
            if escape {
                buf.extend_from_slice(escape_header(name).as_bytes());
                buf.put_u8(b':');
                buf.extend_from_slice(escape_header(value).as_bytes());
            } else {
                buf.extend_from_slice(name.as_bytes());
                buf.put_u8(b':');
                buf.extend_from_slice(value.as_bytes());
            }
            buf.put_u8(b'\n');
        }
        buf.put_u8(b'\n');
        buf.extend_from_slice(&self.body);
        buf.put_u8(0);
    }

    pub fn decode(buf: &mut BytesMut) -> Result<Option<Frame>, ProtocolError> {
        // Heart-beats are bare EOLs between frames
        let leading = buf
            .iter()
            .take_while(|b| **b == b'\n' || **b == b'\r')
            .count();
        buf.advance(leading);

        if buf.is_empty() {
            return Ok(None);
        }

        let (head_len, body_start) = match find_head_end(buf) {
            Some(bounds) => bounds,
            None => return incomplete(buf.len()),
        };

        let (command, headers) = parse_head(&buf[..head_len])?;

        let content_length = headers
            .iter()
            .find(|(k, _)| k == "content-length")
            .map(|(_, v)| {
                v.trim().parse::<usize>().map_err(|_| {
                    ProtocolError::MalformedFrame(format!("invalid content-length {:?}", v))
                })
            })
            .transpose()?;

        let body_len = match content_length {
            Some(len) => {
                let total = body_start
                    .checked_add(len)
                    .and_then(|n| n.checked_add(1))
                    .unwrap_or(usize::MAX);
                if total > MAX_FRAME_BYTES {
                    return Err(ProtocolError::FrameTooLarge {
                        size: total,
                        limit: MAX_FRAME_BYTES,
                    });
                }
                if buf.len() < total {
                    return Ok(None); // Body not fully available yet
                }
                if buf[body_start + len] != 0 {
                    return Err(ProtocolError::MalformedFrame(
                        "body is not terminated by NUL after content-length octets".into(),
                    ));
                }
                len
            }
            None => match buf[body_start..].iter().position(|b| *b == 0) {
                Some(len) => len,
                None => return incomplete(buf.len()),
            },
        };

        // At this point, full frame is available
        let mut raw = buf.split_to(body_start + body_len + 1);
        raw.advance(body_start);
        let body = raw.split_to(body_len).freeze();

        Ok(Some(Frame {
            command,
            headers,
            body,
        }))
    }
}

fn incomplete(buffered: usize) -> Result<Option<Frame>, ProtocolError> {
    if buffered > MAX_FRAME_BYTES {
        return Err(ProtocolError::FrameTooLarge {
            size: buffered,
            limit: MAX_FRAME_BYTES,
        });
    }
    Ok(None)
}

/// Returns (length of command + header lines, offset of the first body octet).
fn find_head_end(buf: &[u8]) -> Option<(usize, usize)> {
    let mut i = 0;
    while i < buf.len() {
        if buf[i] == b'\n' {
            match &buf[i + 1..] {
                [b'\n', ..] => return Some((i, i + 2)),
                [b'\r', b'\n', ..] => return Some((i, i + 3)),
                _ => {}
            }
        }
        i += 1;
    }
    None
}

fn parse_head(head: &[u8]) -> Result<(Command, Vec<(String, String)>), ProtocolError> {
    let head = std::str::from_utf8(head)
        .map_err(|_| ProtocolError::MalformedFrame("frame head is not UTF-8".into()))?;

    let mut lines = head.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));
    let command = Command::try_from(lines.next().unwrap_or_default())?;
    let escaped = command.escapes_headers();

    let mut headers = Vec::new();
    for line in lines {
        let (name, value) = line.split_once(':').ok_or_else(|| {
            ProtocolError::MalformedFrame(format!("header line without colon: {:?}", line))
        })?;
        if escaped {
            headers.push((unescape_header(name)?, unescape_header(value)?));
        } else {
            headers.push((name.to_string(), value.to_string()));
        }
    }

    Ok((command, headers))
}
