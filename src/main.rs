use std::io;

use anyhow::Result;
use clap::Parser;
use commandline::{Operation, Options};
use log::debug;
use tacgen::{driver, samples};

mod commandline;

fn main() -> Result<()> {
    let options = Options::parse();

    stderrlog::new()
        .module(module_path!())
        .verbosity(options.verbose)
        .init()?;

    match options.operation {
        Operation::List => {
            for name in samples::NAMES {
                println!("{}", name);
            }
        }
        Operation::Emit { sample, output } => {
            debug!("building sample '{}'", sample);
            let program = samples::build(&sample)?;

            match output {
                Some(path) => driver::compile_to_file(&program, path)?,
                None => {
                    driver::compile_to_writer(&program, io::stdout().lock())?;
                }
            }
        }
    }

    Ok(())
}
