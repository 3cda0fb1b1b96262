//! envshift cli interface

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Formatter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Change the work directory
    ///
    /// Can be specified multiple times. Note that all
    /// paths on the way to the final path must exist.
    ///
    /// This is equivalent to running { cd <directory>; envshift ... }
    #[clap(short = 'C', long = "directory", global(true))]
    pub directory: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rewrite a document for an environment
    ///
    /// Reads the document from stdin unless --input-file is provided
    #[command(alias = "gen")]
    Generate(GenerateCommand),

    /// Check that every field of a definition knows an environment
    Check(CheckCommand),
}

#[derive(Parser, Debug)]
pub struct TargetArgs {
    /// Definition file with fields and overrides
    #[clap(short = 'd', long = "definition")]
    pub definition: PathBuf,

    /// Environment to generate for
    #[clap(short = 'e', long = "environment")]
    pub environment: String,
}

#[derive(Parser, Debug)]
pub struct GenerateCommand {
    #[clap(flatten)]
    pub target: TargetArgs,

    /// Document to rewrite
    #[clap(short = 'f', long = "input-file")]
    pub input: Option<PathBuf>,

    #[clap(flatten)]
    pub output: OutputArgs,

    /// Keep scheme and host of fields without a binding for the environment
    /// instead of failing
    #[clap(long = "allow-missing-environment")]
    pub allow_missing_environment: bool,
}

#[derive(Parser, Debug)]
pub struct CheckCommand {
    #[clap(flatten)]
    pub target: TargetArgs,
}

#[derive(Parser, Debug)]
pub struct OutputArgs {
    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: OutputFormat,

    /// Write to a file instead of stdout
    #[clap(short = 'o', long = "output-file")]
    pub file: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum OutputFormat {
    Json,
    #[default]
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}
