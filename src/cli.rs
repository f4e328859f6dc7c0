use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::build::compiler;
use crate::config::presets;
use crate::config::types::{BuildOptions, RunOptions, TestInput};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the solution in a directory
    Build {
        /// Solution directory
        #[arg(long, default_value = ".")]
        directory: PathBuf,
        /// Show the assembled compiler command
        #[arg(short, long)]
        verbose: bool,
        /// Build with sanitizers (default: target's preference)
        #[arg(long, conflicts_with = "no_sanitizer")]
        sanitizer: bool,
        /// Build without sanitizers
        #[arg(long)]
        no_sanitizer: bool,
    },
    /// Run a compiled solution binary
    Run {
        /// Path to the binary
        binary: PathBuf,
        /// Wrap the run in valgrind
        #[arg(long)]
        memcheck: bool,
        /// Enable colored sanitizer diagnostics
        #[arg(long)]
        sanitizer: bool,
        /// Feed stdin from this file instead of the terminal
        #[arg(long)]
        stdin_file: Option<PathBuf>,
        /// Capture output and print the result as JSON
        #[arg(long)]
        json: bool,
        /// Arguments passed to the binary
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
    },
}

pub fn run() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            directory,
            verbose,
            sanitizer,
            no_sanitizer,
        } => {
            let target = presets::default_target();
            let sanitizer = if sanitizer {
                true
            } else if no_sanitizer {
                false
            } else {
                target.default_sanitizer
            };
            let options = BuildOptions { sanitizer, verbose };

            match compiler::compile(&directory, &target, &options)? {
                Some(_) => Ok(()),
                None => bail!("build failed"),
            }
        }
        Commands::Run {
            binary,
            memcheck,
            sanitizer,
            stdin_file,
            json,
            args,
        } => {
            let options = RunOptions { sanitizer, memcheck };
            let input = match stdin_file {
                Some(path) => TestInput::File(path),
                None => TestInput::Stdin,
            };

            let result = crate::exec::runner::run(&binary, &args, &options, &input, json)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
                Ok(())
            } else {
                // Mirror the child's exit status, signals included.
                let code = result.exit_code.unwrap_or(128 + result.signal.unwrap_or(0));
                std::process::exit(code);
            }
        }
    }
}
