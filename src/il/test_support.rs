//! Shorthands for building the trees used by generator tests.

use crate::ast::*;

/// Generates a program holding a single unit and compares the emitted lines.
macro_rules! assert_generates {
    ($unit:expr, $il:expr) => {{
        let program: crate::ast::Program = [crate::ast::Unit::from($unit)].into_iter().collect();
        let lines = crate::il::generate(&program).to_lines();

        assert_eq!(lines, $il)
    }};
}

pub fn func(name: &str) -> Function {
    Function::new(TypeSpec::Void, name)
}

pub fn int(value: &str) -> Expr {
    Expr::constant(value, TypeSpec::Int)
}

pub fn var(name: &str) -> Expr {
    Expr::var(name, TypeSpec::Int)
}

pub fn elem(name: &str, index: Expr) -> Expr {
    Expr::index(name, index, TypeSpec::Int)
}

pub fn add(lhs: Expr, rhs: Expr) -> Expr {
    Expr::binary(BinOp::Add, lhs, rhs, TypeSpec::Int)
}

pub fn mul(lhs: Expr, rhs: Expr) -> Expr {
    Expr::binary(BinOp::Mul, lhs, rhs, TypeSpec::Int)
}

pub fn lt(lhs: Expr, rhs: Expr) -> Expr {
    Expr::binary(BinOp::Lt, lhs, rhs, TypeSpec::Int)
}

/// `name = value;`
pub fn set(name: &str, value: Expr) -> Stmt {
    Stmt::expr(Expr::assign(Variable::scalar(name, TypeSpec::Int), value))
}

/// `name[index] = value;`
pub fn set_elem(name: &str, index: Expr, value: Expr) -> Stmt {
    Stmt::expr(Expr::assign(
        Variable::element(name, index, TypeSpec::Int),
        value,
    ))
}
