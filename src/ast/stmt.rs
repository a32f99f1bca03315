//! Statement and top-level nodes.
use super::{Expr, TypeSpec};

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// An expression evaluated for its effects. `;` on its own carries no expression.
    Expression(Option<Expr>),
    Block(Block),
    If(If),
    While(While),
    For(For),
    Return(Option<Expr>),
    Declaration(Declaration),
}
impl Stmt {
    pub fn expr(expr: Expr) -> Self {
        Self::Expression(Some(expr))
    }

    pub fn empty() -> Self {
        Self::Expression(None)
    }

    pub fn block(statements: Vec<Stmt>) -> Self {
        Self::Block(Block::new(statements))
    }

    pub fn if_then(condition: Expr, then_branch: Stmt) -> Self {
        Self::If(If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: None,
        })
    }

    pub fn if_else(condition: Expr, then_branch: Stmt, else_branch: Stmt) -> Self {
        Self::If(If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: Some(Box::new(else_branch)),
        })
    }

    pub fn while_loop(condition: Expr, body: Stmt) -> Self {
        Self::While(While {
            condition,
            body: Box::new(body),
        })
    }

    pub fn for_loop(
        init: Option<Expr>,
        condition: Option<LoopCondition>,
        update: Option<Expr>,
        body: Stmt,
    ) -> Self {
        Self::For(For {
            init,
            condition,
            update,
            body: Box::new(body),
        })
    }

    pub fn ret(expr: Option<Expr>) -> Self {
        Self::Return(expr)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
}
impl Block {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }

    pub fn push(&mut self, stmt: Stmt) {
        self.statements.push(stmt);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub condition: Expr,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct For {
    pub init: Option<Expr>,
    pub condition: Option<LoopCondition>,
    pub update: Option<Expr>,
    pub body: Box<Stmt>,
}

/// The controlling clause of a `for` loop. Grammars that reuse the expression-statement rule
/// for this clause hand over a wrapped statement rather than a bare expression.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopCondition {
    Bare(Expr),
    Statement(Option<Expr>),
}
impl LoopCondition {
    /// The expression that produces the loop's truth value, if the clause has one.
    pub fn expression(&self) -> Option<&Expr> {
        match self {
            LoopCondition::Bare(expr) => Some(expr),
            LoopCondition::Statement(expr) => expr.as_ref(),
        }
    }
}
impl From<Expr> for LoopCondition {
    fn from(expr: Expr) -> Self {
        LoopCondition::Bare(expr)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub type_spec: TypeSpec,
    pub declarators: Vec<Declarator>,
}
impl Declaration {
    pub fn new(type_spec: TypeSpec) -> Self {
        Self {
            type_spec,
            declarators: vec![],
        }
    }

    pub fn scalar<S: Into<String>>(mut self, name: S) -> Self {
        self.declarators.push(Declarator::new(name, 0));
        self
    }

    pub fn array<S: Into<String>>(mut self, name: S, length: usize) -> Self {
        self.declarators.push(Declarator::new(name, length));
        self
    }
}
impl From<Declaration> for Stmt {
    fn from(decl: Declaration) -> Self {
        Stmt::Declaration(decl)
    }
}

/// A declared name. A `length` of zero declares a scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declarator {
    pub name: String,
    pub length: usize,
}
impl Declarator {
    pub fn new<S: Into<String>>(name: S, length: usize) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }

    pub fn is_array(&self) -> bool {
        self.length > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub type_spec: TypeSpec,
    pub name: String,
}
impl Param {
    pub fn new<S: Into<String>>(type_spec: TypeSpec, name: S) -> Self {
        Self {
            type_spec,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub return_type: TypeSpec,
    pub name: String,
    pub params: Vec<Param>,
    pub body: Block,
}
impl Function {
    pub fn new<S: Into<String>>(return_type: TypeSpec, name: S) -> Self {
        Self {
            return_type,
            name: name.into(),
            params: vec![],
            body: Block::default(),
        }
    }

    pub fn param<S: Into<String>>(mut self, type_spec: TypeSpec, name: S) -> Self {
        self.params.push(Param::new(type_spec, name));
        self
    }

    pub fn body(mut self, statements: Vec<Stmt>) -> Self {
        self.body = Block::new(statements);
        self
    }
}

/// A unit of translation at file scope.
#[derive(Debug, Clone, PartialEq)]
pub enum Unit {
    Function(Function),
    Declaration(Declaration),
}
impl From<Function> for Unit {
    fn from(function: Function) -> Self {
        Unit::Function(function)
    }
}
impl From<Declaration> for Unit {
    fn from(decl: Declaration) -> Self {
        Unit::Declaration(decl)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub units: Vec<Unit>,
}
impl Program {
    pub fn new() -> Self {
        Self { units: vec![] }
    }

    pub fn add_unit<U: Into<Unit>>(&mut self, unit: U) {
        self.units.push(unit.into());
    }
}
impl FromIterator<Unit> for Program {
    fn from_iter<I: IntoIterator<Item = Unit>>(iter: I) -> Self {
        Self {
            units: iter.into_iter().collect(),
        }
    }
}
