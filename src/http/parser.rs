use crate::http::request::{Method, Request};
use std::collections::HashMap;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The stream ended before any request line arrived
    Empty,
    /// Bad token count, empty token or bad version syntax
    Malformed,
    /// The header block is not terminated yet
    Incomplete,
}

/// Parses one request head (request line plus headers) from `buf`.
///
/// Parsing stops at the first blank line. When `eof` is set the end of the
/// buffer also terminates the head, so a client that half-closes after the
/// request line is still answered.
///
/// On success returns the request and the number of bytes consumed.
pub fn parse_http_request(buf: &[u8], eof: bool) -> Result<(Request, usize), ParseError> {
    if buf.is_empty() {
        return Err(if eof { ParseError::Empty } else { ParseError::Incomplete });
    }

    let mut lines = Lines { buf, pos: 0, eof };

    // Request line
    let request_line = lines.next().ok_or(ParseError::Incomplete)?;
    let request_line = String::from_utf8_lossy(request_line);

    // Headers
    let mut headers = HashMap::new();

    loop {
        let Some(line) = lines.next() else {
            if eof {
                break;
            }
            return Err(ParseError::Incomplete);
        };

        if line.is_empty() {
            break;
        }

        if let Some((key, value)) = parse_header_line(line) {
            headers.insert(key, value);
        }
    }

    let (method, path, version) = split_request_line(&request_line)?;

    let request = Request {
        method: Method::from_token(method),
        path: path.to_string(),
        version: version.to_string(),
        headers,
    };

    Ok((request, lines.pos))
}

/// Splits the request line on single spaces into method, target, version.
///
/// Trailing spaces are ignored; doubled inner spaces leave an empty token.
fn split_request_line(line: &str) -> Result<(&str, &str, &str), ParseError> {
    let tokens: Vec<&str> = line.trim_end_matches(' ').split(' ').collect();

    let &[method, path, version] = tokens.as_slice() else {
        return Err(ParseError::Malformed);
    };

    if method.is_empty() || path.is_empty() || version.is_empty() {
        return Err(ParseError::Malformed);
    }

    if !is_version_syntax(version) {
        return Err(ParseError::Malformed);
    }

    Ok((method, path, version))
}

/// `HTTP/<digit>.<digit>`
fn is_version_syntax(token: &str) -> bool {
    match token.as_bytes() {
        [b'H', b'T', b'T', b'P', b'/', major, b'.', minor] => {
            major.is_ascii_digit() && minor.is_ascii_digit()
        }
        _ => false,
    }
}

/// Returns the lowercase name and trimmed value, or `None` if either is empty.
fn parse_header_line(line: &[u8]) -> Option<(String, String)> {
    let line = String::from_utf8_lossy(line);
    let (key, value) = line.split_once(':')?;

    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key.to_ascii_lowercase(), value.to_string()))
}

/// Yields lines terminated by LF, with an optional CR stripped.
struct Lines<'a> {
    buf: &'a [u8],
    pos: usize,
    eof: bool,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let buf = self.buf;
        let rest = &buf[self.pos..];
        if rest.is_empty() {
            return None;
        }

        let (line, consumed) = match rest.iter().position(|&b| b == b'\n') {
            Some(i) => (&rest[..i], i + 1),
            // An unterminated trailing line only counts once the peer is done
            None if self.eof => (rest, rest.len()),
            None => return None,
        };

        self.pos += consumed;
        Some(line.strip_suffix(b"\r").unwrap_or(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.0\r\nHost: example.com\r\n\r\n";

        let (parsed, consumed) = parse_http_request(req, false).unwrap();

        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.headers.get("host").unwrap(), "example.com");
        assert_eq!(consumed, req.len());
    }

    #[test]
    fn version_syntax() {
        assert!(is_version_syntax("HTTP/1.0"));
        assert!(is_version_syntax("HTTP/2.7"));
        assert!(!is_version_syntax("HTTP/1.10"));
        assert!(!is_version_syntax("http/1.0"));
        assert!(!is_version_syntax("HTTP/x.0"));
    }

    #[test]
    fn lines_wait_for_terminator() {
        let mut lines = Lines { buf: b"abc\r\nde", pos: 0, eof: false };
        assert_eq!(lines.next(), Some(&b"abc"[..]));
        assert_eq!(lines.next(), None);
        assert_eq!(lines.pos, 5);
    }
}
