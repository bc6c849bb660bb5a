//! Token definitions for the Base language
//!
//! This module defines the token kinds produced by lexical analysis and the
//! reserved-word table.

use std::fmt;

/// A token in the Base language
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Verbatim lexeme, or the decoded contents for string-like literals.
    pub text: String,
    /// Line the token starts on (1-based).
    pub line: usize,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }

    /// Create an end-of-file token
    pub fn eof(line: usize) -> Self {
        Self::new(TokenKind::EndOfFile, String::new(), line)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfFile
    }

    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Symbol && self.text == symbol
    }

    /// Human readable form used in parse errors: the quoted text, or `end of file`.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EndOfFile => "end of file".to_string(),
            _ => format!("'{}'", self.text),
        }
    }
}

/// Token kinds in the Base language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Keyword(Keyword),
    Number,
    /// Double-quoted string literal
    String,
    /// Backtick-delimited literal, possibly spanning lines
    TemplateLiteral,
    Symbol,
    EndOfFile,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier => write!(f, "identifier"),
            Self::Keyword(kw) => write!(f, "keyword '{}'", kw),
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
            Self::TemplateLiteral => write!(f, "template literal"),
            Self::Symbol => write!(f, "symbol"),
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}

macro_rules! keywords {
    ($($variant:ident => $text:literal,)*) => {
        /// Reserved words of the Base language
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $($variant,)*
        }

        impl Keyword {
            /// Every reserved word, in declaration order.
            pub const ALL: &'static [Keyword] = &[$(Keyword::$variant,)*];

            /// Get keyword from string
            pub fn lookup(s: &str) -> Option<Self> {
                match s {
                    $($text => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Get string representation of keyword
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }
        }
    };
}

keywords! {
    // Declarations
    Let => "let",
    Const => "const",
    Var => "var",
    Function => "function",
    Return => "return",

    // Types
    Number => "number",
    String => "string",
    Boolean => "boolean",
    Void => "void",
    Any => "any",
    Unknown => "unknown",
    Never => "never",
    Object => "object",
    Array => "array",
    Tuple => "tuple",
    Enum => "enum",
    Interface => "interface",
    Type => "type",

    // Control flow
    If => "if",
    Else => "else",
    Switch => "switch",
    Case => "case",
    Default => "default",
    For => "for",
    While => "while",
    Do => "do",
    Break => "break",
    Continue => "continue",
    Try => "try",
    Catch => "catch",
    Finally => "finally",
    Throw => "throw",

    // Literals and operators
    True => "true",
    False => "false",
    Null => "null",
    Undefined => "undefined",
    This => "this",
    New => "new",
    Delete => "delete",
    Typeof => "typeof",
    Instanceof => "instanceof",
    In => "in",
    Await => "await",
    Async => "async",
    Yield => "yield",

    // Classes and modules
    Class => "class",
    Extends => "extends",
    Implements => "implements",
    Export => "export",
    Import => "import",
    From => "from",
    As => "as",
    Namespace => "namespace",
    Public => "public",
    Private => "private",
    Protected => "protected",
    Readonly => "readonly",
    Static => "static",

    // Built-ins
    Print => "print",
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Two-character operators, matched before falling back to a single character.
pub const TWO_CHAR_SYMBOLS: &[&str] = &[
    "==", "!=", "<=", ">=", "&&", "||", "+=", "-=", "*=", "/=", "%=", "++", "--", ">>", "<<",
];
