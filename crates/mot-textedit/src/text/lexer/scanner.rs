//! Lexer implementation using logos

use super::token::{Token, TokenKind};
use crate::common::{RomError, RomResult, Span};
use logos::Logos;

/// Length of a complete escape such as `\x02`, in characters
const ESCAPE_CHARS: usize = 4;

/// Lexer for one message body.
///
/// Spans are reported relative to the whole script file: `base` is the byte
/// offset of the body within the file and `line` its 1-based line number.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    base: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(body: &'a str, base: usize, line: usize) -> Self {
        Self {
            inner: TokenKind::lexer(body),
            base,
            line,
        }
    }

    /// Get the next token, or `None` at the end of the body
    pub fn next_token(&mut self) -> Option<RomResult<Token>> {
        let kind = self.inner.next()?;
        let span = Span::from(self.inner.span());

        Some(match kind {
            Ok(kind) => Ok(Token::new(kind, span.offset_by(self.base))),
            Err(()) if self.source()[span.start..].starts_with('\\') => {
                Err(self.malformed_escape(span.start))
            }
            Err(()) => Err(RomError::MalformedLine {
                line: self.line,
                span: span.offset_by(self.base),
            }),
        })
    }

    /// Build the error for a bad escape starting at `start`, covering the
    /// characters that should have formed it
    fn malformed_escape(&self, start: usize) -> RomError {
        let rest = &self.source()[start..];
        let len = rest
            .char_indices()
            .nth(ESCAPE_CHARS)
            .map_or(rest.len(), |(end, _)| end);
        let text = &rest[..len];
        RomError::malformed_escape(
            self.line,
            text,
            Span::new(start, start + len).offset_by(self.base),
        )
    }

    /// Decode the whole body into the bytes it stands for
    pub fn encode_all(mut self) -> RomResult<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.source().len());
        while let Some(token) = self.next_token() {
            let token = token?;
            match token.kind {
                TokenKind::Escape(byte) => bytes.push(byte),
                TokenKind::Literal => bytes.extend_from_slice(self.inner.slice().as_bytes()),
            }
        }
        Ok(bytes)
    }

    /// Get the body being lexed
    pub fn source(&self) -> &'a str {
        self.inner.source()
    }
}

impl Iterator for Lexer<'_> {
    type Item = RomResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn encode(body: &str) -> RomResult<Vec<u8>> {
        Lexer::new(body, 0, 1).encode_all()
    }

    #[test]
    fn test_tokens() {
        let tokens: Vec<Token> = Lexer::new("Hi\\x02!", 8, 1).map(Result::unwrap).collect();
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Literal, Span::new(8, 10)),
                Token::new(TokenKind::Escape(0x02), Span::new(10, 14)),
                Token::new(TokenKind::Literal, Span::new(14, 15)),
            ]
        );
    }

    #[test]
    fn test_encode_literals_and_escapes() {
        assert_eq!(encode("Hi!\\x02").unwrap(), b"Hi!\x02");
        assert_eq!(encode("\\x07\\xAA\\xbb").unwrap(), [0x07, 0xAA, 0xBB]);
        assert_eq!(encode("").unwrap(), b"");
    }

    #[test]
    fn test_escape_is_always_one_byte() {
        // No control-code table on this side: the parameter count is the author's business
        assert_eq!(encode("\\x15\\x01").unwrap(), [0x15, 0x01]);
    }

    #[test]
    fn test_marker_character_is_not_checked() {
        assert_eq!(encode("\\X41").unwrap(), b"A");
    }

    #[test]
    fn test_non_ascii_literal_passes_through() {
        assert_eq!(encode("é").unwrap(), "é".as_bytes());
    }

    #[test]
    fn test_bad_hex_digits() {
        let err = Lexer::new("ab\\xzz", 8, 3).encode_all().unwrap_err();
        match err {
            RomError::MalformedEscape { line, text, span } => {
                assert_eq!(line, 3);
                assert_eq!(text, "\\xzz");
                assert_eq!(span, Span::new(10, 14));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_line_break_inside_body_is_not_an_escape() {
        let err = Lexer::new("a\rb", 8, 2).encode_all().unwrap_err();
        assert!(matches!(
            err,
            RomError::MalformedLine { line: 2, span } if span == Span::new(9, 10)
        ));
    }

    #[test]
    fn test_truncated_escape() {
        let err = encode("end\\x0").unwrap_err();
        assert!(matches!(err, RomError::MalformedEscape { ref text, .. } if text == "\\x0"));

        let err = encode("\\").unwrap_err();
        assert!(matches!(err, RomError::MalformedEscape { ref text, .. } if text == "\\"));
    }
}
