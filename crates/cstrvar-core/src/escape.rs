//! C string-literal escaping.
//!
//! Lines are handled as raw bytes. Printable text, including well-formed
//! non-ASCII UTF-8, passes through unchanged; everything a C compiler would
//! misread is escaped.
//!
//! ## Escape table
//!
//! | Input                          | Output               |
//! |--------------------------------|----------------------|
//! | `\` `"`                        | `\\` `\"`            |
//! | BEL BS HT LF VT FF CR          | `\a \b \t \n \v \f \r` |
//! | `?` directly after `?`         | `\?`                 |
//! | other control characters       | `\ooo` per byte      |
//! | bytes that are not valid UTF-8 | `\ooo` per byte      |
//!
//! Octal escapes are always three digits wide, so a digit following one in
//! the input can never be absorbed into the escape.

use crate::error::{Error, Result};

/// Escape a line into a complete quoted C string literal.
///
/// ```
/// use cstrvar_core::escape_line;
///
/// assert_eq!(escape_line(b"say \"hi\"\n"), r#""say \"hi\"\n""#);
/// ```
pub fn escape_line(line: &[u8]) -> String {
    let mut out = String::with_capacity(line.len() + 2);
    out.push('"');
    escape_into(&mut out, line);
    out.push('"');
    out
}

/// Append the escaped body of `line` to `out`, without surrounding quotes.
pub fn escape_into(out: &mut String, line: &[u8]) {
    let mut after_question = false;
    let mut rest = line;

    while !rest.is_empty() {
        match std::str::from_utf8(rest) {
            Ok(text) => {
                push_text(out, text, &mut after_question);
                break;
            }
            Err(e) => {
                let (valid, tail) = rest.split_at(e.valid_up_to());
                // `valid` is well-formed, so this borrows without replacement
                push_text(out, &String::from_utf8_lossy(valid), &mut after_question);

                let bad = e.error_len().unwrap_or(tail.len());
                for &byte in &tail[..bad] {
                    push_octal(out, byte);
                }
                after_question = false;
                rest = &tail[bad..];
            }
        }
    }
}

fn push_text(out: &mut String, text: &str, after_question: &mut bool) {
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\x0b' => out.push_str("\\v"),
            '\x0c' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            // `??x` would be read as a trigraph
            '?' if *after_question => out.push_str("\\?"),
            c if c.is_control() => {
                let mut buf = [0u8; 4];
                for &byte in c.encode_utf8(&mut buf).as_bytes() {
                    push_octal(out, byte);
                }
            }
            c => out.push(c),
        }
        *after_question = c == '?';
    }
}

fn push_octal(out: &mut String, byte: u8) {
    out.push('\\');
    out.push(char::from(b'0' + (byte >> 6)));
    out.push(char::from(b'0' + ((byte >> 3) & 0o7)));
    out.push(char::from(b'0' + (byte & 0o7)));
}

/// Decode a quoted C string literal back into the bytes it denotes.
///
/// Accepts every C simple escape, octal escapes of one to three digits and
/// hexadecimal escapes. The input must be exactly one literal, quotes
/// included.
pub fn unescape_literal(literal: &str) -> Result<Vec<u8>> {
    let bytes = literal.as_bytes();
    if bytes.first() != Some(&b'"') {
        return Err(Error::invalid_literal(0, "missing opening quote"));
    }

    let mut out = Vec::with_capacity(bytes.len());
    let mut pos = 1;

    loop {
        match bytes.get(pos) {
            None => return Err(Error::invalid_literal(pos, "unterminated literal")),
            Some(b'"') => {
                pos += 1;
                break;
            }
            Some(b'\n') => return Err(Error::invalid_literal(pos, "unescaped newline")),
            Some(b'\\') => {
                let (byte, len) = unescape_one(bytes, pos)?;
                out.push(byte);
                pos += len;
            }
            Some(&byte) => {
                out.push(byte);
                pos += 1;
            }
        }
    }

    if pos != bytes.len() {
        return Err(Error::invalid_literal(
            pos,
            "trailing characters after closing quote",
        ));
    }

    Ok(out)
}

/// Decode the escape sequence starting at the backslash at `start`.
///
/// Returns the byte and the length of the sequence including the backslash.
fn unescape_one(bytes: &[u8], start: usize) -> Result<(u8, usize)> {
    let Some(&kind) = bytes.get(start + 1) else {
        return Err(Error::invalid_literal(start, "unterminated escape sequence"));
    };

    let simple = match kind {
        b'\'' => Some(b'\''),
        b'"' => Some(b'"'),
        b'?' => Some(b'?'),
        b'\\' => Some(b'\\'),
        b'a' => Some(0x07),
        b'b' => Some(0x08),
        b'f' => Some(0x0c),
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        b't' => Some(b'\t'),
        b'v' => Some(0x0b),
        _ => None,
    };
    if let Some(byte) = simple {
        return Ok((byte, 2));
    }

    match kind {
        b'0'..=b'7' => {
            let digits = bytes[start + 1..]
                .iter()
                .take(3)
                .take_while(|b| matches!(b, b'0'..=b'7'))
                .count();
            let value = bytes[start + 1..start + 1 + digits]
                .iter()
                .fold(0u32, |acc, &d| acc * 8 + u32::from(d - b'0'));
            let byte = u8::try_from(value)
                .map_err(|_| Error::invalid_literal(start, "octal escape out of range"))?;
            Ok((byte, 1 + digits))
        }
        b'x' => {
            let digits = bytes[start + 2..]
                .iter()
                .take_while(|b| b.is_ascii_hexdigit())
                .count();
            if digits == 0 {
                return Err(Error::invalid_literal(start, "hex escape without digits"));
            }
            let hex = &bytes[start + 2..start + 2 + digits];
            let value = hex.iter().try_fold(0u8, |acc, &d| {
                let nibble = match d {
                    b'0'..=b'9' => d - b'0',
                    b'a'..=b'f' => d - b'a' + 10,
                    _ => d - b'A' + 10,
                };
                acc.checked_mul(16)?.checked_add(nibble)
            });
            let byte = value
                .ok_or_else(|| Error::invalid_literal(start, "hex escape out of range"))?;
            Ok((byte, 2 + digits))
        }
        other => Err(Error::invalid_literal(
            start,
            format!("unknown escape sequence '\\{}'", char::from(other)),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_line_is_only_quoted() {
        assert_eq!(escape_line(b"hello, world"), "\"hello, world\"");
        assert_eq!(escape_line(b""), "\"\"");
    }

    #[test]
    fn test_quote_and_backslash() {
        assert_eq!(escape_line(b"a\"b\\c"), r#""a\"b\\c""#);
    }

    #[test]
    fn test_simple_control_escapes() {
        assert_eq!(
            escape_line(b"\x07\x08\t\n\x0b\x0c\r"),
            r#""\a\b\t\n\v\f\r""#
        );
    }

    #[test]
    fn test_other_controls_use_octal() {
        assert_eq!(escape_line(b"\x00\x1b[0m\x7f"), r#""\000\033[0m\177""#);
        // a digit after an escape stays a separate character
        assert_eq!(escape_line(b"\x001"), r#""\0001""#);
    }

    #[test]
    fn test_trigraph_sequences_are_broken_up() {
        assert_eq!(escape_line(b"what??!"), r#""what?\?!""#);
        assert_eq!(escape_line(b"???="), r#""?\?\?=""#);
        assert_eq!(escape_line(b"? ?"), "\"? ?\"");
    }

    #[test]
    fn test_utf8_passes_through() {
        assert_eq!(escape_line("héllo wörld ✓\n".as_bytes()), "\"héllo wörld ✓\\n\"");
    }

    #[test]
    fn test_c1_controls_use_octal() {
        assert_eq!(escape_line("a\u{85}b".as_bytes()), r#""a\302\205b""#);
    }

    #[test]
    fn test_invalid_utf8_uses_octal() {
        assert_eq!(escape_line(b"ok\xff\xfeok"), r#""ok\377\376ok""#);
        // truncated multi-byte sequence at the end of the line
        assert_eq!(escape_line(b"x\xe2\x9c"), r#""x\342\234""#);
    }

    #[test]
    fn test_unescape_simple() {
        assert_eq!(unescape_literal(r#""a\"b\\c\n""#).unwrap(), b"a\"b\\c\n");
        assert_eq!(unescape_literal(r#""\'\?\a\b\f\r\t\v""#).unwrap(), b"'?\x07\x08\x0c\r\t\x0b");
    }

    #[test]
    fn test_unescape_numeric() {
        assert_eq!(unescape_literal(r#""\0\12\1234""#).unwrap(), b"\x00\n\x534");
        assert_eq!(unescape_literal(r#""\x41\x7e""#).unwrap(), b"A~");
    }

    #[test]
    fn test_unescape_errors() {
        assert!(unescape_literal("abc").is_err());
        assert!(unescape_literal("\"abc").is_err());
        assert!(unescape_literal("\"abc\\").is_err());
        assert!(unescape_literal(r#""\q""#).is_err());
        assert!(unescape_literal(r#""\400""#).is_err());
        assert!(unescape_literal(r#""\x""#).is_err());
        assert!(unescape_literal(r#""\x100""#).is_err());
        assert!(unescape_literal(r#""a" b"#).is_err());
    }

    #[test]
    fn test_unescape_inverts_escape() {
        let line = b"tab\there \"quoted\" ??= \x01\xff caf\xc3\xa9\n";
        assert_eq!(unescape_literal(&escape_line(line)).unwrap(), line.to_vec());
    }
}
