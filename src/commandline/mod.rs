use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(about = "Lowers syntax trees of a small C-like language to three-address code")]
pub struct Options {
    #[command(subcommand)]
    pub operation: Operation,
    #[arg(short, long, default_value_t = 1)]
    pub verbose: usize,
}

#[derive(Debug, Subcommand)]
pub enum Operation {
    /// List the built-in sample programs
    List,
    /// Generate three-address code for a sample program
    Emit {
        sample: String,
        /// Write to this file instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
