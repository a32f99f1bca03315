//! Built-in demonstration programs, assembled directly as syntax trees.

use crate::{ast::*, error::DriverError};

/// Names accepted by [`build`].
pub const NAMES: [&str; 3] = ["factorial", "sum_array", "max"];

/// Build the sample program with the given name.
pub fn build(name: &str) -> Result<Program, DriverError> {
    let units: Vec<Unit> = match name {
        "factorial" => vec![factorial().into(), factorial_main().into()],
        "sum_array" => vec![sum_of_squares().into()],
        "max" => vec![max().into()],
        other => return Err(DriverError::UnknownSample(other.to_string())),
    };
    Ok(units.into_iter().collect())
}

fn int(value: &str) -> Expr {
    Expr::constant(value, TypeSpec::Int)
}

fn var(name: &str) -> Expr {
    Expr::var(name, TypeSpec::Int)
}

fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::binary(op, lhs, rhs, TypeSpec::Int)
}

fn assign(name: &str, value: Expr) -> Expr {
    Expr::assign(Variable::scalar(name, TypeSpec::Int), value)
}

/// ```c
/// int fact(int n) {
///     int result;
///     result = 1;
///     while (n > 1) { result = result * n; n = n - 1; }
///     return result;
/// }
/// ```
fn factorial() -> Function {
    Function::new(TypeSpec::Int, "fact")
        .param(TypeSpec::Int, "n")
        .body(vec![
            Declaration::new(TypeSpec::Int).scalar("result").into(),
            Stmt::expr(assign("result", int("1"))),
            Stmt::while_loop(
                binary(BinOp::Gt, var("n"), int("1")),
                Stmt::block(vec![
                    Stmt::expr(assign("result", binary(BinOp::Mul, var("result"), var("n")))),
                    Stmt::expr(assign("n", binary(BinOp::Sub, var("n"), int("1")))),
                ]),
            ),
            Stmt::ret(Some(var("result"))),
        ])
}

/// ```c
/// int main() { int x; x = fact(5); return x; }
/// ```
fn factorial_main() -> Function {
    Function::new(TypeSpec::Int, "main").body(vec![
        Declaration::new(TypeSpec::Int).scalar("x").into(),
        Stmt::expr(assign(
            "x",
            Expr::call("fact", vec![int("5")], TypeSpec::Int),
        )),
        Stmt::ret(Some(var("x"))),
    ])
}

/// ```c
/// int sum(int n) {
///     int a[10], i, s;
///     s = 0;
///     for (i = 0; i < n; i = i + 1) { a[i] = i * i; s = s + a[i]; }
///     return s;
/// }
/// ```
fn sum_of_squares() -> Function {
    Function::new(TypeSpec::Int, "sum")
        .param(TypeSpec::Int, "n")
        .body(vec![
            Declaration::new(TypeSpec::Int)
                .array("a", 10)
                .scalar("i")
                .scalar("s")
                .into(),
            Stmt::expr(assign("s", int("0"))),
            Stmt::for_loop(
                Some(assign("i", int("0"))),
                Some(LoopCondition::Statement(Some(binary(
                    BinOp::Lt,
                    var("i"),
                    var("n"),
                )))),
                Some(assign("i", binary(BinOp::Add, var("i"), int("1")))),
                Stmt::block(vec![
                    Stmt::expr(Expr::assign(
                        Variable::element("a", var("i"), TypeSpec::Int),
                        binary(BinOp::Mul, var("i"), var("i")),
                    )),
                    Stmt::expr(assign(
                        "s",
                        binary(
                            BinOp::Add,
                            var("s"),
                            Expr::index("a", var("i"), TypeSpec::Int),
                        ),
                    )),
                ]),
            ),
            Stmt::ret(Some(var("s"))),
        ])
}

/// ```c
/// int max(int a, int b) { if (a > b) return a; else return b; }
/// ```
fn max() -> Function {
    Function::new(TypeSpec::Int, "max")
        .param(TypeSpec::Int, "a")
        .param(TypeSpec::Int, "b")
        .body(vec![Stmt::if_else(
            binary(BinOp::Gt, var("a"), var("b")),
            Stmt::ret(Some(var("a"))),
            Stmt::ret(Some(var("b"))),
        )])
}
