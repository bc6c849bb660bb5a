//! Parser module
//!
//! This module handles parsing tokens into an Abstract Syntax Tree (AST).

pub mod ast;
pub mod parser;

pub use ast::{Block, Expr, Program, Stmt};
pub use parser::{Parser, TokenSource, MAX_NESTING_DEPTH};
