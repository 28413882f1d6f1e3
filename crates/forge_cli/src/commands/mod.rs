//! CLI command definitions.
//!
//! Each subcommand replays a recorded agent session against a fresh file
//! store and prints the resulting project tree.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::ForgeConfig;

pub mod replay;
pub mod tools;

/// Blueprint Forge - virtual file store for agent-scaffolded infrastructure
#[derive(Parser)]
#[command(name = "forge")]
#[command(version, about = "Blueprint Forge - virtual file store for agent-scaffolded infrastructure")]
#[command(long_about = r#"
Blueprint Forge keeps the files an AI agent scaffolds in memory and projects
them into a navigable project tree.

WORKFLOWS:
  replay  → Apply a script of file events (create / stream / complete)
  tools   → Drive recorded writeToFile / createFile tool calls

SCRIPT FORMATS:
  .json (array), .jsonl / .ndjson (one record per line), .yaml / .yml (list)

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments or script
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (YAML, TOML or JSON)
    #[arg(short, long, global = true, env = "FORGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a file event script
    Replay(replay::ReplayArgs),

    /// Replay recorded agent tool calls
    Tools(tools::ToolsArgs),
}

/// Settings shared by every command.
#[derive(Debug)]
pub struct Context {
    pub config: ForgeConfig,
    pub quiet: bool,
}

impl Context {
    pub fn load(cli: &Cli) -> Result<Self> {
        Ok(Self {
            config: ForgeConfig::load(cli.config.as_deref())?,
            quiet: cli.quiet,
        })
    }
}
