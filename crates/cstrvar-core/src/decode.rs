//! Reading generated declarations back.
//!
//! Only the exact layout written by [`emit`](crate::emit()) is accepted.

use crate::error::{Error, Result};
use crate::escape::unescape_literal;

/// A declaration parsed back into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Declared variable name
    pub name: String,
    /// Concatenated bytes of all literals
    pub content: Vec<u8>,
    /// Number of literal lines
    pub lines: usize,
}

/// Parse a fragment produced by the emitter.
pub fn decode_fragment(fragment: &str) -> Result<Decoded> {
    let mut lines = fragment.lines().enumerate().map(|(i, l)| (i + 1, l));

    let (_, header) = lines
        .next()
        .ok_or_else(|| Error::malformed_fragment(1, "empty fragment"))?;
    let name = header
        .strip_prefix("const char ")
        .and_then(|rest| rest.strip_suffix("[] = \\"))
        .ok_or_else(|| Error::malformed_fragment(1, "expected 'const char <name>[] = \\'"))?;

    let mut decoded = Decoded {
        name: name.to_string(),
        content: Vec::new(),
        lines: 0,
    };

    loop {
        let Some((number, line)) = lines.next() else {
            return Err(Error::malformed_fragment(
                decoded.lines + 2,
                "missing ';' terminator",
            ));
        };

        if line == ";" {
            break;
        }

        let literal = line
            .strip_prefix("  ")
            .and_then(|rest| rest.strip_suffix(" \\"))
            .ok_or_else(|| Error::malformed_fragment(number, "expected '  \"...\" \\'"))?;
        let bytes = unescape_literal(literal)
            .map_err(|e| Error::malformed_fragment(number, e.to_string()))?;

        decoded.content.extend_from_slice(&bytes);
        decoded.lines += 1;
    }

    if let Some((number, _)) = lines.find(|(_, l)| !l.trim().is_empty()) {
        return Err(Error::malformed_fragment(
            number,
            "unexpected text after terminator",
        ));
    }

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::emit_to_string;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_decode_empty_declaration() {
        let decoded = decode_fragment("const char x[] = \\\n;\n").unwrap();
        assert_eq!(
            decoded,
            Decoded {
                name: "x".to_string(),
                content: Vec::new(),
                lines: 0,
            }
        );
    }

    #[test]
    fn test_decode_reconstructs_input() {
        let input = "line one\nline \"two\"\\\n\ttabbed??!\nlast";
        let decoded = decode_fragment(&emit_to_string(input.as_bytes(), "doc")).unwrap();
        assert_eq!(decoded.name, "doc");
        assert_eq!(decoded.content, input.as_bytes());
        assert_eq!(decoded.lines, 4);
    }

    #[test]
    fn test_decode_empty_name() {
        let decoded = decode_fragment(&emit_to_string(b"a\n", "")).unwrap();
        assert_eq!(decoded.name, "");
        assert_eq!(decoded.content, b"a\n");
    }

    #[test]
    fn test_decode_rejects_bad_header() {
        let err = decode_fragment("char x[] = \\\n;\n").unwrap_err();
        assert!(matches!(err, Error::MalformedFragment { line: 1, .. }));
    }

    #[test]
    fn test_decode_rejects_missing_terminator() {
        let err = decode_fragment("const char x[] = \\\n  \"a\" \\\n").unwrap_err();
        assert!(matches!(err, Error::MalformedFragment { line: 3, .. }));
    }

    #[test]
    fn test_decode_rejects_bad_literal() {
        let err = decode_fragment("const char x[] = \\\n  \"\\q\" \\\n;\n").unwrap_err();
        assert!(matches!(err, Error::MalformedFragment { line: 2, .. }));
    }

    #[test]
    fn test_decode_rejects_trailing_text() {
        let err = decode_fragment("const char x[] = \\\n;\nint y;\n").unwrap_err();
        assert!(matches!(err, Error::MalformedFragment { line: 3, .. }));
    }

    proptest! {
        #[test]
        fn prop_round_trip_bytes(input in proptest::collection::vec(any::<u8>(), 0..512)) {
            let decoded = decode_fragment(&emit_to_string(&input, "blob")).unwrap();
            prop_assert_eq!(decoded.content, input);
        }

        #[test]
        fn prop_round_trip_text(
            input in "(\\PC|[\\n\\r\\t\"\\\\?])*",
            name in "[A-Za-z_][A-Za-z0-9_]{0,16}",
        ) {
            let fragment = emit_to_string(input.as_bytes(), &name);
            let decoded = decode_fragment(&fragment).unwrap();
            prop_assert_eq!(decoded.lines, input.split_inclusive('\n').count());
            prop_assert_eq!(decoded.name, name);
            prop_assert_eq!(decoded.content, input.into_bytes());
        }
    }
}
