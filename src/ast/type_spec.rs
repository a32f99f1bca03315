//! C type specifications.
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// The semantic type attached to a node by the checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeSpec {
    Int,
    Float,
    Double,
    Char,
    Void,
}
impl Display for TypeSpec {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            TypeSpec::Int => "int",
            TypeSpec::Float => "float",
            TypeSpec::Double => "double",
            TypeSpec::Char => "char",
            TypeSpec::Void => "void",
        })
    }
}
impl FromStr for TypeSpec {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "int" => TypeSpec::Int,
            "float" => TypeSpec::Float,
            "double" => TypeSpec::Double,
            "char" => TypeSpec::Char,
            "void" => TypeSpec::Void,
            _ => return Err(()),
        })
    }
}
