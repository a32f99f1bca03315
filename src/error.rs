use std::io;

use thiserror::Error;

/// Failure to deliver generated instructions to their destination.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write instruction on line {line}")]
    Write {
        line: usize,
        #[source]
        source: io::Error,
    },
    #[error("failed to flush the instruction stream")]
    Flush(#[source] io::Error),
}

/// An error raised by the program driver before or after generation.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("unknown sample program '{0}'")]
    UnknownSample(String),
    #[error(transparent)]
    Sink(#[from] SinkError),
}
