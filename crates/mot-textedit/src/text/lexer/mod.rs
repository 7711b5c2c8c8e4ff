//! Lexer module for tokenizing message bodies in script files

mod token;
mod scanner;

pub use token::{Token, TokenKind};
pub use scanner::Lexer;
