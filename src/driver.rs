//! Runs a generation pass over a program and delivers the instructions.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{
    ast::Program,
    error::DriverError,
    il::{self, TacListing, WriterSink},
    prelude::*,
};

/// Generate a program into memory.
pub fn compile(program: &Program) -> TacListing {
    debug!("generating {} top-level units", program.units.len());
    il::generate(program)
}

/// Generate a program, streaming each instruction to `writer` as it is produced.
pub fn compile_to_writer<W: Write>(program: &Program, writer: W) -> Result<W, DriverError> {
    let mut sink = WriterSink::new(writer);
    il::generate_into(program, &mut sink);
    debug!("wrote {} lines", sink.lines());
    Ok(sink.finish()?)
}

/// Generate a program into a file, replacing its contents.
pub fn compile_to_file<P: AsRef<Path>>(program: &Program, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;

    compile_to_writer(program, BufWriter::new(file))
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!("wrote three-address code to {}", path.display());
    Ok(())
}
