use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "vecmeta",
    version,
    about = "Enumerate vector ids from a Vectorize index and fetch their metadata"
)]
pub struct Cli {
    /// Config file read on top of ~/.config/vecmeta/vecmeta.toml
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, short, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Repeat to raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Enumerate ids and print the metadata of every returned vector
    Dump {
        /// Print ids, metadata, stats and timestamp instead of the metadata list
        #[arg(long)]
        report: bool,
        /// Page through every vector in the index instead of one top_k query
        #[arg(long)]
        all: bool,
    },
    /// Enumerate ids only
    Ids {
        /// Page through every vector in the index instead of one top_k query
        #[arg(long)]
        all: bool,
    },
    /// List the metadata indexes configured on the index
    Indexes,
}

impl Default for Command {
    fn default() -> Self {
        Command::Dump {
            report: false,
            all: false,
        }
    }
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or_default()
    }
}
