//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::ModuleSystem;
use crate::error::ExtractError;
use crate::syntax::Position;

/// Extract JSX fragments into standalone React components
#[derive(Parser, Debug)]
#[command(name = "jsx-extract")]
#[command(about = "Extracts a selected JSX fragment into a named React component")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(short, long, default_value = "text", value_enum, global = true)]
    pub format: OutputFormat,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extraction settings (TOML)
    #[arg(long, value_name = "FILE", env = "JSX_EXTRACT_CONFIG", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract a fragment into a component definition
    Extract(ExtractArgs),
    /// Check whether text is a JSX fragment
    Check(CheckArgs),
    /// Check whether a range of a file lies inside JSX
    Contains(ContainsArgs),
    /// Report whether text defines a function or class component
    Shape(ShapeArgs),
    /// Print the markup that instantiates a component
    Instantiate(InstantiateArgs),
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// File holding the selected fragment, or `-` for stdin
    #[arg(value_name = "FILE", default_value = "-")]
    pub input: PathBuf,

    /// File the component is written to; names the component
    #[arg(long, value_name = "PATH")]
    pub target: PathBuf,

    /// File the selection was taken from (defaults to the target)
    #[arg(long, value_name = "PATH")]
    pub source: Option<PathBuf>,

    /// Override the configured module system
    #[arg(long, value_enum)]
    pub module_system: Option<ModuleSystem>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// File holding the text, or `-` for stdin
    #[arg(value_name = "FILE", default_value = "-")]
    pub input: PathBuf,

    /// Require a single root element (no sibling wrapping)
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct ContainsArgs {
    /// Source file to inspect
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Range start as zero-based LINE:CHARACTER
    #[arg(long, value_parser = parse_position)]
    pub start: Position,

    /// Range end as zero-based LINE:CHARACTER
    #[arg(long, value_parser = parse_position)]
    pub end: Position,
}

#[derive(Args, Debug)]
pub struct ShapeArgs {
    /// File holding the definition, or `-` for stdin
    #[arg(value_name = "FILE", default_value = "-")]
    pub input: PathBuf,
}

#[derive(Args, Debug)]
pub struct InstantiateArgs {
    /// Component name
    #[arg(long)]
    pub name: String,

    /// Names read from `this.state`
    #[arg(long, value_delimiter = ',')]
    pub state: Vec<String>,

    /// Names taken from local scope
    #[arg(long = "args", value_delimiter = ',')]
    pub arguments: Vec<String>,

    /// Names read from `this.props`
    #[arg(long, value_delimiter = ',')]
    pub props: Vec<String>,

    /// Names read from `this`
    #[arg(long, value_delimiter = ',')]
    pub members: Vec<String>,
}

/// Output format options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain generated text
    #[default]
    Text,
    /// JSON including binding metadata
    Json,
}

/// Parse `LINE:CHARACTER`
pub fn parse_position(input: &str) -> Result<Position, ExtractError> {
    let invalid = || ExtractError::InvalidPosition {
        input: input.to_string(),
    };

    let (line, character) = input.split_once(':').ok_or_else(invalid)?;
    let line = line.trim().parse().map_err(|_| invalid())?;
    let character = character.trim().parse().map_err(|_| invalid())?;
    Ok(Position::new(line, character))
}
