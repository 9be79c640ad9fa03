//! Lisp‑style dump of an expression tree, used by `snox parse` and by the
//! parser tests to pin down precedence and associativity.

use std::fmt::Write as _;

use crate::ast::{Expr, LiteralValue};

/// Renders an expression in parenthesised prefix form, e.g.
/// `(* (group (+ 1.0 2.0)) 3.0)`.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(expr: &Expr) -> String {
        let mut out = String::new();
        Self::write_expr(&mut out, expr);
        out
    }

    fn write_expr(out: &mut String, expr: &Expr) {
        match expr {
            Expr::Literal(literal) => Self::write_literal(out, literal),

            Expr::Grouping(inner) => Self::parenthesize(out, "group", &[inner.as_ref()]),

            Expr::Unary { operator, right } => {
                Self::parenthesize(out, &operator.lexeme, &[right.as_ref()])
            }

            Expr::Binary {
                left,
                operator,
                right,
            }
            | Expr::Logical {
                left,
                operator,
                right,
            } => Self::parenthesize(
                out,
                &operator.lexeme,
                &[left.as_ref(), right.as_ref()],
            ),

            Expr::Variable { name, .. } => out.push_str(&name.lexeme),

            Expr::Assign { name, value, .. } => {
                let head = format!("= {}", name.lexeme);
                Self::parenthesize(out, &head, &[value.as_ref()]);
            }

            Expr::Call {
                callee, arguments, ..
            } => {
                let mut operands: Vec<&Expr> = Vec::with_capacity(arguments.len() + 1);
                operands.push(callee.as_ref());
                operands.extend(arguments.iter());

                Self::parenthesize(out, "call", &operands);
            }
        }
    }

    /// Integral numbers keep one decimal place so `3` and `3.5` read alike.
    fn write_literal(out: &mut String, literal: &LiteralValue) {
        match literal {
            LiteralValue::Number(n) if n.fract() == 0.0 => {
                let _ = write!(out, "{:.1}", n);
            }
            LiteralValue::Number(n) => {
                let _ = write!(out, "{}", n);
            }
            LiteralValue::Str(s) => out.push_str(s),
            LiteralValue::True => out.push_str("true"),
            LiteralValue::False => out.push_str("false"),
            LiteralValue::Nil => out.push_str("nil"),
        }
    }

    fn parenthesize(out: &mut String, name: &str, operands: &[&Expr]) {
        out.push('(');
        out.push_str(name);

        for operand in operands {
            out.push(' ');
            Self::write_expr(out, operand);
        }

        out.push(')');
    }
}
