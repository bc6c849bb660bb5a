//! # Base Programming Language
//!
//! Front end for Base, a small statically-annotated scripting language:
//! source text goes in, an owned syntax tree comes out.
//!
//! ## Architecture
//!
//! - `lexer`: Tokenization of source code, one token at a time
//! - `parser`: Recursive-descent parsing into an Abstract Syntax Tree (AST)
//! - `printer`: Indented dump of the AST
//! - `error`: Error types and diagnostics
//! - `cli`: Command-line arguments of the `base` binary

pub mod cli;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;

// Re-export commonly used types
pub use error::{BaseError, BaseResult, Diagnostic, LexWarning};
pub use lexer::{Keyword, Lexer, LexerOptions, Token, TokenKind};
pub use parser::{Parser, Program, TokenSource};

/// Version of the Base language front end
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse a Base program with the default lexer options
pub fn parse(source: &str) -> BaseResult<Program> {
    parse_with_options(source, LexerOptions::default())
}

/// Parse a Base program
///
/// Lexing and parsing happen in a single pass; the first lexer or parser
/// error aborts the whole parse.
pub fn parse_with_options(source: &str, options: LexerOptions) -> BaseResult<Program> {
    let lexer = Lexer::with_options(source, options);
    Parser::new(lexer)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_parse_with_strict_options() {
        assert!(parse("print(`hi`);").is_ok());

        let err = parse_with_options("print(`hi`);", LexerOptions::strict()).unwrap_err();
        assert_eq!(err.kind(), "Lexer error");
    }
}
