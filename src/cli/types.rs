//! CLI type definitions.
//!
//! Clap command structures that define the mirrorcheck interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mirrorcheck")]
#[command(about = "Reconcile Linear issue status against mirrored GitHub issues", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Load configuration from this file instead of mirrorcheck.yaml
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report one Linear issue and its linked GitHub issues
    Issue {
        /// Linear issue identifier (e.g. MOCO-1233)
        identifier: String,
    },

    /// Reconcile every issue in a team and report mismatches
    Team {
        /// Team key or name (e.g. MOCO or MojoCompiler)
        selector: String,

        /// Also show issues whose status combination is expected
        #[arg(long)]
        show_all: bool,

        /// Process at most N issues from the paginated fetch
        #[arg(long, value_name = "N")]
        stop_after: Option<usize>,

        /// Write the report as a markdown document to this path
        #[arg(long, value_name = "PATH")]
        export: Option<PathBuf>,
    },
}
