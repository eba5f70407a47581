//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Selective pruning of labeled JSON trees
#[derive(Parser, Debug)]
#[command(name = "rsprune")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Increase log verbosity (-d, -dd, -ddd)
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding named tree documents (default: cwd)
    #[arg(short, long, global = true, value_hint = ValueHint::DirPath)]
    pub source_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prune a named tree down to matching nodes and their ancestors
    Filter {
        /// Tree name (resolves to <source_dir>/<name>.json)
        name: String,

        /// Label the matched nodes' parent must carry
        #[arg(short, long)]
        under: String,

        /// Field key to compare inside candidate nodes
        #[arg(short, long)]
        key: String,

        /// Target values; JSON scalars read as themselves, bare words as strings
        #[arg(short, long, value_delimiter = ',', required = true)]
        values: Vec<String>,

        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Show a named tree as an indented hierarchy
    Show {
        /// Tree name
        name: String,
    },

    /// List tree names available in the source directory
    List,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create global config template
    Init,

    /// Show config paths
    Path,
}
