//! Abstract Syntax Tree definitions
//!
//! This module defines the AST node types for the Base language. Every node
//! owns its children and records the source line it starts on.

use std::{fmt, mem};

/// Root AST node representing a complete program
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

/// Statement node
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Variable declaration: let number x = 42, string s = "a";
    VariableDeclaration {
        kind: DeclarationKind,
        declarators: Vec<Declarator>,
        line: usize,
    },

    /// Function declaration: function number add(number a, number b) { ... }
    FunctionDeclaration {
        name: String,
        params: Vec<Parameter>,
        return_type: ReturnType,
        body: Block,
        line: usize,
    },

    /// Block statement
    Block(Block),

    /// Return statement
    Return { argument: Option<Expr>, line: usize },

    /// Expression statement
    Expression { expression: Expr, line: usize },
}

impl Stmt {
    pub fn line(&self) -> usize {
        match self {
            Stmt::VariableDeclaration { line, .. }
            | Stmt::FunctionDeclaration { line, .. }
            | Stmt::Return { line, .. }
            | Stmt::Expression { line, .. } => *line,
            Stmt::Block(block) => block.line,
        }
    }
}

/// A braced statement list
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub line: usize,
}

/// `let` or `const`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Let,
    Const,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Let => "let",
            Self::Const => "const",
        }
    }
}

/// One `type name = init` binding of a variable declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub name: String,
    pub ty: ValueType,
    pub init: Expr,
    pub line: usize,
}

/// A typed function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: ValueType,
    pub line: usize,
}

/// Type annotation on a declarator or parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Number,
    String,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
        }
    }
}

/// Declared return type of a function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnType {
    Value(ValueType),
    Void,
}

impl ReturnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Value(ty) => ty.as_str(),
            Self::Void => "void",
        }
    }
}

/// Expression node
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value
    Literal { value: Literal, line: usize },

    /// Variable reference
    Identifier { name: String, line: usize },

    /// Binary operation
    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
        line: usize,
    },

    /// Function call
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
        line: usize,
    },
}

impl Expr {
    pub fn line(&self) -> usize {
        match self {
            Expr::Literal { line, .. }
            | Expr::Identifier { line, .. }
            | Expr::Binary { line, .. }
            | Expr::Call { line, .. } => *line,
        }
    }
}

// Operator chains nest to the left without bound, so children are unlinked
// onto a worklist instead of being dropped recursively.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.take_children(&mut pending);
        }
    }
}

impl Expr {
    fn take_children(&mut self, into: &mut Vec<Expr>) {
        match self {
            Expr::Binary { left, right, .. } => {
                into.push(mem::replace(left.as_mut(), Expr::hollow()));
                into.push(mem::replace(right.as_mut(), Expr::hollow()));
            }
            Expr::Call {
                callee, arguments, ..
            } => {
                into.push(mem::replace(callee.as_mut(), Expr::hollow()));
                into.append(arguments);
            }
            Expr::Literal { .. } | Expr::Identifier { .. } => {}
        }
    }

    fn hollow() -> Expr {
        Expr::Identifier {
            name: String::new(),
            line: 0,
        }
    }
}

/// Binary operators. All four share one precedence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    /// Map an operator symbol to its operator, if it is one.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "*" => Some(Self::Multiply),
            "/" => Some(Self::Divide),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    String(String),
}
