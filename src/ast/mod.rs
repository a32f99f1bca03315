//! Abstract Syntax Tree definitions
mod expr;
mod stmt;
mod type_spec;

pub use expr::*;
pub use stmt::*;
pub use type_spec::*;
