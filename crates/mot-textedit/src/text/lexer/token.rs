//! Token definitions for message bodies

use crate::common::Span;
use logos::Logos;

/// Token with its location in the message body
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Value of the two hex digits ending an escape
fn escape_value(lex: &mut logos::Lexer<TokenKind>) -> Option<u8> {
    let slice = lex.slice();
    u8::from_str_radix(&slice[slice.len() - 2..], 16).ok()
}

/// Pieces of a message body.
///
/// An escape is a backslash, one marker character (normally `x`) and two hex
/// digits; the marker itself is not checked.
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Raw byte written as `\xHH`
    #[regex(r"\\[^\r\n][0-9a-fA-F]{2}", escape_value)]
    Escape(u8),

    /// Run of characters copied verbatim
    #[regex(r"[^\\\r\n]+")]
    Literal,
}
