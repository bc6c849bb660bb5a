//! Indented AST dump for debugging
//!
//! Each node renders on its own line, children two spaces deeper. Call
//! arguments sit two levels below the call so they stand apart from the
//! callee.

use std::fmt::{self, Write};

use crate::parser::ast::*;

/// Writes an indented dump of AST nodes into any [`fmt::Write`] sink.
pub struct Printer<'w, W: Write> {
    out: &'w mut W,
}

impl<'w, W: Write> Printer<'w, W> {
    pub fn new(out: &'w mut W) -> Self {
        Self { out }
    }

    pub fn program(&mut self, program: &Program, indent: usize) -> fmt::Result {
        self.line(indent, format_args!("Program"))?;
        for stmt in &program.statements {
            self.stmt(stmt, indent + 1)?;
        }
        Ok(())
    }

    pub fn stmt(&mut self, stmt: &Stmt, indent: usize) -> fmt::Result {
        match stmt {
            Stmt::VariableDeclaration {
                kind, declarators, ..
            } => {
                self.line(
                    indent,
                    format_args!("{} VariableDeclaration", kind.as_str()),
                )?;
                for declarator in declarators {
                    self.line(
                        indent + 1,
                        format_args!("{} {} =", declarator.ty.as_str(), declarator.name),
                    )?;
                    self.expr(&declarator.init, indent + 2)?;
                }
                Ok(())
            }
            Stmt::FunctionDeclaration {
                name,
                params,
                return_type,
                body,
                ..
            } => {
                self.line(
                    indent,
                    format_args!("FunctionDeclaration: {} -> {}", name, return_type.as_str()),
                )?;
                self.indent(indent + 1)?;
                self.out.write_str("Params:")?;
                for param in params {
                    write!(self.out, " {} {}", param.ty.as_str(), param.name)?;
                }
                self.out.write_char('\n')?;
                self.block(body, indent + 1)
            }
            Stmt::Block(block) => self.block(block, indent),
            Stmt::Return { argument, .. } => {
                self.line(indent, format_args!("ReturnStatement"))?;
                match argument {
                    Some(argument) => self.expr(argument, indent + 1),
                    None => Ok(()),
                }
            }
            Stmt::Expression { expression, .. } => {
                self.line(indent, format_args!("ExpressionStatement"))?;
                self.expr(expression, indent + 1)
            }
        }
    }

    pub fn block(&mut self, block: &Block, indent: usize) -> fmt::Result {
        self.line(indent, format_args!("Block"))?;
        for stmt in &block.statements {
            self.stmt(stmt, indent + 1)?;
        }
        Ok(())
    }

    pub fn expr(&mut self, expr: &Expr, indent: usize) -> fmt::Result {
        match expr {
            Expr::Literal {
                value: Literal::Number(value),
                ..
            } => self.line(indent, format_args!("NumberLiteral: {}", value)),
            Expr::Literal {
                value: Literal::String(value),
                ..
            } => self.line(indent, format_args!("StringLiteral: \"{}\"", value)),
            Expr::Identifier { name, .. } => {
                self.line(indent, format_args!("Identifier: {}", name))
            }
            Expr::Binary { .. } => self.binary(expr, indent),
            Expr::Call {
                callee, arguments, ..
            } => {
                self.line(indent, format_args!("CallExpression"))?;
                self.expr(callee, indent + 1)?;
                for argument in arguments {
                    self.expr(argument, indent + 2)?;
                }
                Ok(())
            }
        }
    }

    /// Walk the left spine of an operator chain with a loop; it can be as
    /// long as the source allows.
    fn binary(&mut self, expr: &Expr, indent: usize) -> fmt::Result {
        let mut rights = Vec::new();
        let mut current = expr;

        while let Expr::Binary {
            left,
            operator,
            right,
            ..
        } = current
        {
            let depth = indent + rights.len();
            self.line(depth, format_args!("BinaryExpression: {}", operator))?;
            rights.push(&**right);
            current = &**left;
        }

        self.expr(current, indent + rights.len())?;
        for (depth, right) in rights.into_iter().enumerate().rev() {
            self.expr(right, indent + depth + 1)?;
        }
        Ok(())
    }

    fn indent(&mut self, indent: usize) -> fmt::Result {
        for _ in 0..indent {
            self.out.write_str("  ")?;
        }
        Ok(())
    }

    fn line(&mut self, indent: usize, args: fmt::Arguments<'_>) -> fmt::Result {
        self.indent(indent)?;
        self.out.write_fmt(args)?;
        self.out.write_char('\n')
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).program(self, 0)
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).stmt(self, 0)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).expr(self, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use pretty_assertions::assert_eq;

    /// Counts lines without keeping the text
    struct LineCount(usize);

    impl Write for LineCount {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.0 += s.matches('\n').count();
            Ok(())
        }
    }

    #[test]
    fn test_dump_program() {
        let program = parse(
            "let number x = 1;\n\
             function number add(number a, number b) { return a + b; }\n\
             print(\"hi\");",
        )
        .unwrap();

        let expected = "\
Program
  let VariableDeclaration
    number x =
      NumberLiteral: 1
  FunctionDeclaration: add -> number
    Params: number a number b
    Block
      ReturnStatement
        BinaryExpression: +
          Identifier: a
          Identifier: b
  ExpressionStatement
    CallExpression
      Identifier: print
        StringLiteral: \"hi\"
";
        assert_eq!(program.to_string(), expected);
    }

    #[test]
    fn test_dump_flat_precedence_shape() {
        let program = parse("const number y = 2 + 3 * 4.5, string s = `t`;").unwrap();

        let expected = "\
Program
  const VariableDeclaration
    number y =
      BinaryExpression: *
        BinaryExpression: +
          NumberLiteral: 2
          NumberLiteral: 3
        NumberLiteral: 4.5
    string s =
      StringLiteral: \"t\"
";
        assert_eq!(program.to_string(), expected);
    }

    #[test]
    fn test_dump_void_function_and_bare_return() {
        let program = parse("function void main() { { return; } }").unwrap();

        let expected = "\
Program
  FunctionDeclaration: main -> void
    Params:
    Block
      Block
        ReturnStatement
";
        assert_eq!(program.to_string(), expected);
    }

    #[test]
    fn test_dump_nested_chain_on_the_right() {
        let program = parse("1 - (2 + 3) + 4;").unwrap();

        let expected = "\
Program
  ExpressionStatement
    BinaryExpression: +
      BinaryExpression: -
        NumberLiteral: 1
        BinaryExpression: +
          NumberLiteral: 2
          NumberLiteral: 3
      NumberLiteral: 4
";
        assert_eq!(program.to_string(), expected);
    }

    #[test]
    fn test_dump_long_operator_chain() {
        let terms = 3_000;
        let program = parse(&format!("print(1{});", "+1".repeat(terms))).unwrap();

        let mut lines = LineCount(0);
        Printer::new(&mut lines).program(&program, 0).unwrap();

        // Program, statement, call and callee, then every operator and operand
        assert_eq!(lines.0, 4 + terms + (terms + 1));
    }
}
