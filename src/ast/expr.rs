//! Expression nodes.
use std::fmt::{self, Display};

use super::TypeSpec;

/// An expression, annotated with the type the checker resolved for it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(Constant),
    Variable(Variable),
    Binary(BinExpr),
    Unary(UnExpr),
    Assign(Assign),
    Call(Call),
}
impl Expr {
    pub fn constant<S: Into<String>>(value: S, type_spec: TypeSpec) -> Self {
        Self::Constant(Constant {
            value: value.into(),
            type_spec,
        })
    }

    pub fn var<S: Into<String>>(name: S, type_spec: TypeSpec) -> Self {
        Self::Variable(Variable::scalar(name, type_spec))
    }

    pub fn index<S: Into<String>>(name: S, index: Expr, type_spec: TypeSpec) -> Self {
        Self::Variable(Variable::element(name, index, type_spec))
    }

    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr, type_spec: TypeSpec) -> Self {
        Self::Binary(BinExpr {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            type_spec,
        })
    }

    pub fn unary(op: UnOp, operand: Expr, type_spec: TypeSpec) -> Self {
        Self::Unary(UnExpr {
            op,
            operand: Box::new(operand),
            type_spec,
        })
    }

    /// An assignment takes the type of its target.
    pub fn assign(target: Variable, value: Expr) -> Self {
        let type_spec = target.type_spec;
        Self::Assign(Assign {
            target,
            value: Box::new(value),
            type_spec,
        })
    }

    pub fn call<S: Into<String>>(name: S, args: Vec<Expr>, type_spec: TypeSpec) -> Self {
        Self::Call(Call {
            name: name.into(),
            args,
            type_spec,
        })
    }

    pub fn type_spec(&self) -> TypeSpec {
        match self {
            Expr::Constant(c) => c.type_spec,
            Expr::Variable(v) => v.type_spec,
            Expr::Binary(b) => b.type_spec,
            Expr::Unary(u) => u.type_spec,
            Expr::Assign(a) => a.type_spec,
            Expr::Call(c) => c.type_spec,
        }
    }

    /// Returns the variable if this is a plain, non-indexed variable reference.
    pub fn as_scalar_var(&self) -> Option<&Variable> {
        match self {
            Expr::Variable(var) if !var.is_indexed() => Some(var),
            _ => None,
        }
    }
}

/// A literal, kept in its source spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    pub value: String,
    pub type_spec: TypeSpec,
}

/// A variable reference, optionally subscripted.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub index: Option<Box<Expr>>,
    pub type_spec: TypeSpec,
}
impl Variable {
    pub fn scalar<S: Into<String>>(name: S, type_spec: TypeSpec) -> Self {
        Self {
            name: name.into(),
            index: None,
            type_spec,
        }
    }

    pub fn element<S: Into<String>>(name: S, index: Expr, type_spec: TypeSpec) -> Self {
        Self {
            name: name.into(),
            index: Some(Box::new(index)),
            type_spec,
        }
    }

    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinExpr {
    pub op: BinOp,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
    pub type_spec: TypeSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnExpr {
    pub op: UnOp,
    pub operand: Box<Expr>,
    pub type_spec: TypeSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub target: Variable,
    pub value: Box<Expr>,
    pub type_spec: TypeSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: String,
    pub args: Vec<Expr>,
    pub type_spec: TypeSpec,
}
impl Call {
    /// Looks up an argument by position. Out-of-range positions yield `None`.
    pub fn argument(&self, index: usize) -> Option<&Expr> {
        self.args.get(index)
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}
impl Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnOp {
    Neg,
    Not,
    BitNot,
}
impl Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            UnOp::Neg => "-",
            UnOp::Not => "!",
            UnOp::BitNot => "~",
        })
    }
}
