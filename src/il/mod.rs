//! Intermediate code generation.

#[cfg(test)]
#[macro_use]
mod test_support;

mod context;
mod control_flow;
mod generator;
mod label_generator;
mod name_generator;
mod sink;
mod tac;

pub use context::Context;
pub use generator::{generate, generate_into, Evaluated, Generate};
pub use sink::{InstructionSink, WriterSink};
pub use tac::*;
