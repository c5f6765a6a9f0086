//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Global flags override config values (which are loaded from XML if present).
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
use crate::platform::LogicalDirectory;

/// Demo shell around the app_files library.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Atomic file staging over well-known directories"
)]
pub struct Args {
    /// Sandbox root: every logical directory lives at <ROOT>/<name>.
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Skip fsync of temp files and directories (faster, less durable).
    #[arg(long, global = true)]
    pub no_durable: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the absolute path for a directory/subpath/name triple
    Resolve {
        dir: LogicalDirectory,
        #[arg(long, default_value = "")]
        subpath: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Create a directory (and intermediates)
    Mkdir {
        dir: LogicalDirectory,
        #[arg(default_value = "")]
        subpath: String,
    },
    /// Remove the top-level segment of SUBPATH under DIR
    Rmdir {
        dir: LogicalDirectory,
        #[arg(default_value = "")]
        subpath: String,
    },
    /// Exit 0 if PATH is an existing directory
    Exists {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: PathBuf,
    },
    /// Create a file with CONTENT; never overwrites
    Write {
        dir: LogicalDirectory,
        name: String,
        content: String,
        #[arg(long, default_value = "")]
        subpath: String,
        /// Replace an existing file atomically instead of refusing
        #[arg(long)]
        force: bool,
    },
    /// Copy NAME between directories through a staging area
    Copy(TransferArgs),
    /// Move NAME between directories through a staging area
    Move(TransferArgs),
    /// Remove a single item
    Rm {
        dir: LogicalDirectory,
        name: String,
        #[arg(long, default_value = "")]
        subpath: String,
    },
    /// Create app-support, write a file under a/b and move it to a
    Demo,
    /// Print the config file location and exit
    PrintConfig,
    /// Write a template config file (never overwrites)
    InitConfig,
}

#[derive(clap::Args, Debug, Clone)]
pub struct TransferArgs {
    pub name: String,
    #[arg(long = "from", default_value = "app-support")]
    pub source_dir: LogicalDirectory,
    #[arg(long = "to", default_value = "app-support")]
    pub dest_dir: LogicalDirectory,
    #[arg(long = "from-subpath", default_value = "")]
    pub source_subpath: String,
    #[arg(long = "to-subpath", default_value = "")]
    pub dest_subpath: String,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(root) = &self.root {
            cfg.root = Some(root.clone());
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(log) = &self.log_file {
            cfg.log_file = Some(log.clone());
        }
        if self.no_durable {
            cfg.durable = false;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
