//! Three-Address Code

use std::fmt::{self, Display, Formatter};

use crate::{
    ast::{BinOp, Param, TypeSpec, UnOp},
    listing::Listing,
};

pub type TacListing = Listing<Instr>;

/// A jump target. Labels are numbered program-wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub usize);
impl Display for Label {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// A storage name: either a variable's own slot or a generated temporary.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum Name {
    /// A source identifier living in its declared slot.
    Var(String),
    /// A generated, temporary name.
    Temp(usize),
}
impl Name {
    /// Whether the value behind this name is already held in a temporary. An identifier that
    /// is spelled like a temporary counts as one.
    pub fn looks_like_temp(&self) -> bool {
        match self {
            Name::Temp(_) => true,
            Name::Var(id) => {
                let digits = id.strip_prefix('t').unwrap_or_default();
                !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
            }
        }
    }
}
impl Display for Name {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Name::Var(id) => f.write_str(id),
            Name::Temp(temp) => write!(f, "t{}", temp),
        }
    }
}

/// A TAC operand. Values can be literals, or references to names that were defined earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A literal in its source spelling.
    Const(String),
    Name(Name),
}
impl From<Name> for Value {
    fn from(name: Name) -> Self {
        Value::Name(name)
    }
}
impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Value::Const(lit) => f.write_str(lit),
            Value::Name(name) => name.fmt(f),
        }
    }
}

/// A single TAC instruction. Each instruction renders as one output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instr {
    /// Load, copy or store a value into a name.
    Assign(Name, Value),
    /// Perform a binary operation.
    Bin(Name, BinOp, Name, Name),
    /// Perform a unary operation.
    Unary(Name, UnOp, Name),
    /// Read an array element.
    IndexLoad(Name, Name, Value),
    /// Write an array element.
    IndexStore(Name, Value, Name),
    /// Jump if a value is true.
    IfTrue(Name, Label),
    /// Jump to a label.
    Goto(Label),
    /// A label which can be jumped to.
    Label(Label),
    /// Push an argument for the next call.
    Param(Name),
    /// Call a function with the given number of pushed arguments.
    Call(Name, String, usize),
    /// Return from the current function.
    Return(Option<Name>),
    /// Annotates a declared variable or array.
    Declare(TypeSpec, String, usize),
    /// Annotates the start of a function.
    Function(TypeSpec, String, Vec<Param>),
    /// Blank line between functions.
    Separator,
}
impl Instr {
    pub fn as_label(&self) -> Option<Label> {
        match self {
            Instr::Label(label) => Some(*label),
            _ => None,
        }
    }

    pub fn jump_target(&self) -> Option<Label> {
        match self {
            Instr::IfTrue(_, label) | Instr::Goto(label) => Some(*label),
            _ => None,
        }
    }

    /// The name written by this instruction, if any. Array stores write an element rather than
    /// a name and are not counted.
    pub fn write(&self) -> Option<&Name> {
        match self {
            Instr::Assign(target, _)
            | Instr::Bin(target, ..)
            | Instr::Unary(target, ..)
            | Instr::IndexLoad(target, ..)
            | Instr::Call(target, ..) => Some(target),
            _ => None,
        }
    }
}
impl Display for Instr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Assign(target, value) => write!(f, "{} = {}", target, value),
            Self::Bin(target, op, lhs, rhs) => write!(f, "{} = {} {} {}", target, lhs, op, rhs),
            Self::Unary(target, op, operand) => write!(f, "{} = {}{}", target, op, operand),
            Self::IndexLoad(target, array, index) => {
                write!(f, "{} = {}[{}]", target, array, index)
            }
            Self::IndexStore(array, index, value) => {
                write!(f, "{}[{}] = {}", array, index, value)
            }
            Self::IfTrue(cond, label) => write!(f, "if {} goto {}", cond, label),
            Self::Goto(label) => write!(f, "goto {}", label),
            Self::Label(label) => write!(f, "{}:", label),
            Self::Param(arg) => write!(f, "param {}", arg),
            Self::Call(target, function, argc) => {
                write!(f, "{} = call {}, {}", target, function, argc)
            }
            Self::Return(None) => f.write_str("return"),
            Self::Return(Some(value)) => write!(f, "return {}", value),
            Self::Declare(type_spec, name, 0) => {
                write!(f, "// Declaration: {} {}", type_spec, name)
            }
            Self::Declare(type_spec, name, length) => {
                write!(f, "// Declaration: {} {}[{}]", type_spec, name, length)
            }
            Self::Function(return_type, name, params) => {
                let params = params
                    .iter()
                    .map(|p| format!("{} {}", p.type_spec, p.name))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "// Function: {} {}({})", return_type, name, params)
            }
            Self::Separator => Ok(()),
        }
    }
}
