//! Command handlers for the CLI subcommands
//!
//! Each handler returns the text to print on stdout.

mod extract;
mod inspect;

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::cli::{Cli, Command, OutputFormat};
use crate::config::ExtractConfig;
use crate::error::{ExtractError, Result};

pub use extract::run_extract;
pub use inspect::{run_check, run_contains, run_instantiate, run_shape};

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub format: OutputFormat,
    pub config: ExtractConfig,
}

impl CommandContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Ok(Self {
            format: cli.format,
            config: ExtractConfig::load_or_default(cli.config.as_deref())?,
        })
    }
}

/// Dispatch the parsed command line
pub fn run(cli: &Cli) -> Result<String> {
    let ctx = CommandContext::from_cli(cli)?;

    match &cli.command {
        Command::Extract(args) => run_extract(args, &ctx),
        Command::Check(args) => run_check(args, &ctx),
        Command::Contains(args) => run_contains(args, &ctx),
        Command::Shape(args) => run_shape(args, &ctx),
        Command::Instantiate(args) => run_instantiate(args, &ctx),
    }
}

/// Read a file, or stdin when the path is `-`
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !path.exists() {
        return Err(ExtractError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(fs::read_to_string(path)?)
}
