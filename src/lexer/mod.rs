//! Lexical analysis module
//!
//! This module handles tokenization of Base source code.

pub mod scanner;
pub mod token;

pub use scanner::{Lexer, LexerOptions};
pub use token::{Keyword, Token, TokenKind};
