//! Parser implementation
//!
//! Recursive descent with a single token of lookahead. The parser state is
//! just the current token and the source it pulls the next one from; it
//! never buffers further ahead and never backtracks.

use super::ast::*;
use crate::error::{BaseError, BaseResult};
use crate::lexer::{Keyword, Lexer, Token, TokenKind};

/// Anything the parser can pull tokens from.
pub trait TokenSource {
    /// Produce the next token. Once the input is exhausted this keeps
    /// returning [`TokenKind::EndOfFile`].
    fn next_token(&mut self) -> BaseResult<Token>;
}

impl TokenSource for Lexer<'_> {
    fn next_token(&mut self) -> BaseResult<Token> {
        Lexer::next_token(self)
    }
}

impl<S: TokenSource + ?Sized> TokenSource for &mut S {
    fn next_token(&mut self) -> BaseResult<Token> {
        (**self).next_token()
    }
}

/// How deep blocks, parentheses and call arguments may nest before parsing
/// gives up with `Nesting too deep`.
pub const MAX_NESTING_DEPTH: usize = 200;

/// Parser for Base source code
pub struct Parser<S> {
    source: S,
    current: Token,
    depth: usize,
}

impl<S: TokenSource> Parser<S> {
    /// Create a new parser, reading the first token from `source`
    pub fn new(mut source: S) -> BaseResult<Self> {
        let current = source.next_token()?;
        Ok(Self {
            source,
            current,
            depth: 0,
        })
    }

    /// Parse the whole token stream into a program.
    ///
    /// Stops at the first error; no partial tree is returned.
    pub fn parse(&mut self) -> BaseResult<Program> {
        tracing::debug!("parsing program");
        let mut statements = Vec::new();

        while !self.current.is_eof() {
            statements.push(self.statement()?);
        }

        tracing::debug!(statements = statements.len(), "parsed program");
        Ok(Program { statements })
    }

    /// The token source this parser reads from
    pub fn token_source(&self) -> &S {
        &self.source
    }

    /// Give the token source back, e.g. to read the lexer's warnings
    pub fn into_token_source(self) -> S {
        self.source
    }

    // ===== Statements =====

    fn statement(&mut self) -> BaseResult<Stmt> {
        match self.current.kind {
            TokenKind::Keyword(Keyword::Let) => self.variable_declaration(DeclarationKind::Let),
            TokenKind::Keyword(Keyword::Const) => self.variable_declaration(DeclarationKind::Const),
            TokenKind::Keyword(Keyword::Function) => self.function_declaration(),
            TokenKind::Keyword(Keyword::Print) => self.print_statement(),
            TokenKind::Keyword(Keyword::Return) => self.return_statement(),
            _ if self.check_symbol("{") => Ok(Stmt::Block(self.block()?)),
            _ => self.expression_statement(),
        }
    }

    fn variable_declaration(&mut self, kind: DeclarationKind) -> BaseResult<Stmt> {
        let line = self.advance()?.line;
        let mut declarators = Vec::new();

        loop {
            let declarator_line = self.current.line;
            let ty = self.value_type("type annotation")?;
            let name = self.identifier("identifier")?;
            self.consume_symbol("=", "Assignment is required in variable declaration")?;
            let init = self.expression()?;

            declarators.push(Declarator {
                name,
                ty,
                init,
                line: declarator_line,
            });

            if !self.match_symbol(",")? {
                break;
            }
        }

        self.consume_symbol(";", "Expected ';' after variable declaration")?;

        Ok(Stmt::VariableDeclaration {
            kind,
            declarators,
            line,
        })
    }

    fn function_declaration(&mut self) -> BaseResult<Stmt> {
        let line = self.advance()?.line;
        let return_type = self.return_type()?;
        let name = self.identifier("function name")?;

        self.consume_symbol("(", "Expected '(' after function name")?;
        let params = self.parameter_list()?;
        self.consume_symbol(")", "Expected ')' after parameters")?;

        let body = self.block()?;

        Ok(Stmt::FunctionDeclaration {
            name,
            params,
            return_type,
            body,
            line,
        })
    }

    fn parameter_list(&mut self) -> BaseResult<Vec<Parameter>> {
        let mut params = Vec::new();
        if self.check_symbol(")") {
            return Ok(params);
        }

        loop {
            let line = self.current.line;
            let ty = self.value_type("parameter type")?;
            let name = self.identifier("parameter name")?;
            params.push(Parameter { name, ty, line });

            if self.match_symbol(",")? {
                continue;
            }
            if self.check_symbol(")") {
                return Ok(params);
            }
            return Err(self.error("Expected ',' or ')' in parameter list"));
        }
    }

    /// `print(expr);` becomes a call to the identifier `print`.
    fn print_statement(&mut self) -> BaseResult<Stmt> {
        let line = self.advance()?.line;

        self.consume_symbol("(", "Expected '(' after 'print'")?;
        let argument = self.expression()?;
        self.consume_symbol(")", "Expected ')' after print argument")?;
        self.consume_symbol(";", "Expected ';' after print statement")?;

        let callee = Expr::Identifier {
            name: Keyword::Print.as_str().to_string(),
            line,
        };
        Ok(Stmt::Expression {
            expression: Expr::Call {
                callee: Box::new(callee),
                arguments: vec![argument],
                line,
            },
            line,
        })
    }

    fn return_statement(&mut self) -> BaseResult<Stmt> {
        let line = self.advance()?.line;

        let argument = if self.check_symbol(";") {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume_symbol(";", "Expected ';' after return statement")?;

        Ok(Stmt::Return { argument, line })
    }

    fn block(&mut self) -> BaseResult<Block> {
        let line = self.current.line;
        self.consume_symbol("{", "Expected '{'")?;
        let statements = self.nested(Self::block_statements)?;
        self.consume_symbol("}", "Expected '}'")?;
        Ok(Block { statements, line })
    }

    fn block_statements(&mut self) -> BaseResult<Vec<Stmt>> {
        let mut statements = Vec::new();
        while !self.check_symbol("}") && !self.current.is_eof() {
            statements.push(self.statement()?);
        }
        Ok(statements)
    }

    fn expression_statement(&mut self) -> BaseResult<Stmt> {
        let line = self.current.line;
        let expression = self.expression()?;
        self.consume_symbol(";", "Expected ';' after expression")?;
        Ok(Stmt::Expression { expression, line })
    }

    // ===== Expressions =====

    /// `+ - * /` all bind equally and associate to the left:
    /// `2 + 3 * 4` is `(2 + 3) * 4`.
    fn expression(&mut self) -> BaseResult<Expr> {
        let mut left = self.primary()?;

        while let Some(operator) = self.binary_operator() {
            let line = self.advance()?.line;
            let right = self.primary()?;
            left = Expr::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
                line,
            };
        }

        Ok(left)
    }

    fn binary_operator(&self) -> Option<BinaryOp> {
        match self.current.kind {
            TokenKind::Symbol => BinaryOp::from_symbol(&self.current.text),
            _ => None,
        }
    }

    fn primary(&mut self) -> BaseResult<Expr> {
        let line = self.current.line;

        match self.current.kind {
            TokenKind::Number => {
                let text = self.advance()?.text;
                let value = text.parse::<f64>().map_err(|_| {
                    BaseError::parse_error(format!("Invalid number literal '{}'", text), line)
                })?;
                Ok(Expr::Literal {
                    value: Literal::Number(value),
                    line,
                })
            }
            TokenKind::String | TokenKind::TemplateLiteral => {
                let text = self.advance()?.text;
                Ok(Expr::Literal {
                    value: Literal::String(text),
                    line,
                })
            }
            TokenKind::Identifier => {
                let name = self.advance()?.text;
                let identifier = Expr::Identifier { name, line };
                if self.match_symbol("(")? {
                    self.nested(|parser| parser.finish_call(identifier, line))
                } else {
                    Ok(identifier)
                }
            }
            _ if self.check_symbol("(") => {
                self.advance()?;
                let expr = self.nested(Self::expression)?;
                self.consume_symbol(")", "Expected ')' after expression")?;
                Ok(expr)
            }
            _ => Err(self.error(format!(
                "Unexpected token {}",
                self.current.describe()
            ))),
        }
    }

    /// Parse call arguments; the opening parenthesis is already consumed.
    fn finish_call(&mut self, callee: Expr, line: usize) -> BaseResult<Expr> {
        let mut arguments = Vec::new();

        if !self.check_symbol(")") {
            loop {
                arguments.push(self.expression()?);

                if self.match_symbol(",")? {
                    continue;
                }
                if self.check_symbol(")") {
                    break;
                }
                return Err(self.error("Expected ',' or ')' in argument list"));
            }
        }

        self.consume_symbol(")", "Expected ')' after arguments")?;

        Ok(Expr::Call {
            callee: Box::new(callee),
            arguments,
            line,
        })
    }

    // ===== Type Parsing =====

    fn value_type(&mut self, what: &str) -> BaseResult<ValueType> {
        let ty = match self.current.kind {
            TokenKind::Keyword(Keyword::Number) => ValueType::Number,
            TokenKind::Keyword(Keyword::String) => ValueType::String,
            _ => {
                return Err(self.error(format!(
                    "Expected {}, got {}",
                    what,
                    self.current.describe()
                )))
            }
        };
        self.advance()?;
        Ok(ty)
    }

    fn return_type(&mut self) -> BaseResult<ReturnType> {
        let ty = match self.current.kind {
            TokenKind::Keyword(Keyword::Number) => ReturnType::Value(ValueType::Number),
            TokenKind::Keyword(Keyword::String) => ReturnType::Value(ValueType::String),
            TokenKind::Keyword(Keyword::Void) => ReturnType::Void,
            _ => {
                return Err(self.error(format!(
                    "Expected return type, got {}",
                    self.current.describe()
                )))
            }
        };
        self.advance()?;
        Ok(ty)
    }

    // ===== Helper Methods =====

    /// Run `parse` one nesting level deeper
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> BaseResult<T>) -> BaseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error("Nesting too deep"));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Move to the next token, returning the one just consumed
    fn advance(&mut self) -> BaseResult<Token> {
        let next = self.source.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn check_symbol(&self, symbol: &str) -> bool {
        self.current.is_symbol(symbol)
    }

    fn match_symbol(&mut self, symbol: &str) -> BaseResult<bool> {
        if self.check_symbol(symbol) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn consume_symbol(&mut self, symbol: &str, message: &str) -> BaseResult<Token> {
        if self.check_symbol(symbol) {
            self.advance()
        } else {
            Err(self.error(message))
        }
    }

    fn identifier(&mut self, what: &str) -> BaseResult<String> {
        if self.current.kind == TokenKind::Identifier {
            Ok(self.advance()?.text)
        } else {
            Err(self.error(format!(
                "Expected {}, got {}",
                what,
                self.current.describe()
            )))
        }
    }

    fn error(&self, message: impl Into<String>) -> BaseError {
        BaseError::parse_error(message, self.current.line)
    }
}
