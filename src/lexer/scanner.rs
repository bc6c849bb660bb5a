//! Lexer/Scanner implementation for the Base language
//!
//! Tokens are produced on demand. The lexer only keeps the source text and a
//! small [`Cursor`]; peeking scans on a copy of the cursor, so it never
//! disturbs the live position.

use super::token::{Keyword, Token, TokenKind, TWO_CHAR_SYMBOLS};
use crate::error::{BaseError, BaseResult, LexWarning};

/// Lexer mode switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerOptions {
    /// Accept backtick-delimited literals. When off, a backtick is a fatal error.
    pub template_literals: bool,
}

impl LexerOptions {
    /// Options that reject backtick literals
    pub fn strict() -> Self {
        Self {
            template_literals: false,
        }
    }
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            template_literals: true,
        }
    }
}

/// Scanning position: byte offset plus the 1-based line counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    pos: usize,
    line: usize,
}

/// Lexer for Base source code
#[derive(Debug)]
pub struct Lexer<'a> {
    source: &'a str,
    cursor: Cursor,
    options: LexerOptions,
    warnings: Vec<LexWarning>,
    /// Set once the iterator has yielded EndOfFile or an error.
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer with default options
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, LexerOptions::default())
    }

    pub fn with_options(source: &'a str, options: LexerOptions) -> Self {
        Self {
            source,
            cursor: Cursor { pos: 0, line: 1 },
            options,
            warnings: Vec::new(),
            finished: false,
        }
    }

    /// Return the next token and advance past it.
    ///
    /// At end of input this keeps returning [`TokenKind::EndOfFile`].
    pub fn next_token(&mut self) -> BaseResult<Token> {
        let mut scan = Scan::new(self.source, self.cursor, self.options);
        let token = scan.token()?;

        self.cursor = scan.cursor;
        for warning in scan.warnings {
            tracing::debug!(line = warning.line, "{}", warning.message);
            self.warnings.push(warning);
        }
        tracing::trace!(kind = %token.kind, text = %token.text, line = token.line, "token");

        Ok(token)
    }

    /// Return the next token without advancing.
    pub fn peek_token(&self) -> BaseResult<Token> {
        Scan::new(self.source, self.cursor, self.options).token()
    }

    /// Non-fatal diagnostics recorded so far
    pub fn warnings(&self) -> &[LexWarning] {
        &self.warnings
    }

    /// Current line counter
    pub fn line(&self) -> usize {
        self.cursor.line
    }

    /// Scan the whole input, up to and including EndOfFile.
    pub fn tokenize(&mut self) -> BaseResult<Vec<Token>> {
        self.by_ref().collect()
    }
}

impl Iterator for Lexer<'_> {
    type Item = BaseResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();
        match &result {
            Ok(token) if token.is_eof() => self.finished = true,
            Err(_) => self.finished = true,
            Ok(_) => {}
        }
        Some(result)
    }
}

/// A single scanning pass over one token, working on its own copy of the cursor.
struct Scan<'a> {
    source: &'a str,
    cursor: Cursor,
    options: LexerOptions,
    warnings: Vec<LexWarning>,
}

impl<'a> Scan<'a> {
    fn new(source: &'a str, cursor: Cursor, options: LexerOptions) -> Self {
        Self {
            source,
            cursor,
            options,
            warnings: Vec::new(),
        }
    }

    /// Scan a single token
    fn token(&mut self) -> BaseResult<Token> {
        self.skip_whitespace_and_comments()?;

        let line = self.cursor.line;
        match self.peek() {
            None => Ok(Token::eof(line)),
            Some(c) if c.is_ascii_alphabetic() || c == '_' => Ok(self.scan_identifier()),
            Some(c) if c.is_ascii_digit() => Ok(self.scan_number()),
            Some('"') => self.scan_string(),
            Some('`') => self.scan_template(),
            Some(_) => Ok(self.scan_symbol()),
        }
    }

    fn skip_whitespace_and_comments(&mut self) -> BaseResult<()> {
        loop {
            match (self.peek(), self.peek_next()) {
                (Some(c), _) if c.is_ascii_whitespace() => {
                    self.advance();
                }
                (Some('/'), Some('/')) => {
                    while !matches!(self.peek(), None | Some('\n')) {
                        self.advance();
                    }
                }
                (Some('/'), Some('*')) => self.skip_block_comment()?,
                _ => return Ok(()),
            }
        }
    }

    fn skip_block_comment(&mut self) -> BaseResult<()> {
        let line = self.cursor.line;
        self.advance(); // '/'
        self.advance(); // '*'

        loop {
            match (self.peek(), self.peek_next()) {
                (None, _) => {
                    return Err(BaseError::lex_error(
                        format!("Unterminated block comment starting at line {}", line),
                        self.cursor.line,
                    ))
                }
                (Some('*'), Some('/')) => {
                    self.advance();
                    self.advance();
                    return Ok(());
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Scan an identifier or keyword
    fn scan_identifier(&mut self) -> Token {
        let line = self.cursor.line;
        let start = self.cursor.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }

        let lexeme = &self.source[start..self.cursor.pos];
        let kind = match Keyword::lookup(lexeme) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Identifier,
        };
        Token::new(kind, lexeme, line)
    }

    /// Scan a number literal. The text is kept verbatim; the parser converts it.
    fn scan_number(&mut self) -> Token {
        let line = self.cursor.line;
        let start = self.cursor.pos;
        let mut seen_dot = false;
        let mut seen_exponent = false;

        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => {}
                '.' if !seen_dot => seen_dot = true,
                'e' | 'E' if !seen_exponent => {
                    seen_exponent = true;
                    if matches!(self.peek_next(), Some('+' | '-')) {
                        self.advance();
                    }
                }
                _ => break,
            }
            self.advance();
        }

        let text = &self.source[start..self.cursor.pos];
        Token::new(TokenKind::Number, text, line)
    }

    /// Scan a double-quoted string literal. It must close on the line it opens.
    fn scan_string(&mut self) -> BaseResult<Token> {
        let line = self.cursor.line;
        self.advance(); // opening quote
        let mut value = String::new();

        loop {
            match self.peek() {
                None => {
                    return Err(BaseError::lex_error("Unterminated string literal", line));
                }
                Some('\n') => {
                    return Err(BaseError::lex_error(
                        "Unterminated string literal: line break before closing quote",
                        line,
                    ));
                }
                Some('"') => {
                    self.advance();
                    return Ok(Token::new(TokenKind::String, value, line));
                }
                Some('\\') => {
                    if self.peek_next() == Some('\n') {
                        return Err(BaseError::lex_error(
                            "Unterminated string literal: line break before closing quote",
                            line,
                        ));
                    }
                    self.scan_escape(&mut value, "Unterminated string literal", line)?;
                }
                Some(_) => {
                    if let Some(c) = self.advance() {
                        value.push(c);
                    }
                }
            }
        }
    }

    /// Scan a backtick literal. Line breaks are kept; `${...}` is plain text.
    fn scan_template(&mut self) -> BaseResult<Token> {
        let line = self.cursor.line;
        if !self.options.template_literals {
            return Err(BaseError::lex_error(
                "Template literals are not allowed in strict mode",
                line,
            ));
        }

        self.advance(); // opening backtick
        let mut value = String::new();

        loop {
            match self.peek() {
                None => {
                    return Err(BaseError::lex_error("Unterminated template literal", line));
                }
                Some('`') => {
                    self.advance();
                    return Ok(Token::new(TokenKind::TemplateLiteral, value, line));
                }
                Some('\\') => self.scan_escape(&mut value, "Unterminated template literal", line)?,
                Some(_) => {
                    if let Some(c) = self.advance() {
                        value.push(c);
                    }
                }
            }
        }
    }

    /// Decode the escape sequence under the cursor into `value`.
    ///
    /// Unknown escapes keep the raw character and record a warning.
    fn scan_escape(
        &mut self,
        value: &mut String,
        unterminated: &str,
        line: usize,
    ) -> BaseResult<()> {
        self.advance(); // backslash
        let escape_line = self.cursor.line;
        let Some(escaped) = self.advance() else {
            return Err(BaseError::lex_error(unterminated, line));
        };

        match escaped {
            'n' => value.push('\n'),
            't' => value.push('\t'),
            'r' => value.push('\r'),
            '"' => value.push('"'),
            '\\' => value.push('\\'),
            other => {
                let shown = if other.is_control() {
                    other.escape_debug().to_string()
                } else {
                    other.to_string()
                };
                self.warnings.push(LexWarning::new(
                    format!("Unknown escape sequence \\{}", shown),
                    escape_line,
                ));
                value.push(other);
            }
        }
        Ok(())
    }

    fn scan_symbol(&mut self) -> Token {
        let line = self.cursor.line;
        let rest = &self.source[self.cursor.pos..];

        if let Some(symbol) = TWO_CHAR_SYMBOLS.iter().find(|symbol| rest.starts_with(**symbol)) {
            self.advance();
            self.advance();
            return Token::new(TokenKind::Symbol, *symbol, line);
        }

        let mut text = String::new();
        if let Some(c) = self.advance() {
            text.push(c);
        }
        Token::new(TokenKind::Symbol, text, line)
    }

    /// Consume one character, counting line breaks
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor.pos += c.len_utf8();
        if c == '\n' {
            self.cursor.line += 1;
        }
        Some(c)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.cursor.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.source[self.cursor.pos..].chars().nth(1)
    }
}
