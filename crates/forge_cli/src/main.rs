//! Blueprint Forge CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments or script

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{Cli, Commands};
use forge_chat::ChatError;
use forge_vfs::VfsError;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_INPUT: u8 = 2;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = match commands::Context::load(&cli) {
        Ok(ctx) => match cli.command {
            Commands::Replay(args) => commands::replay::execute(args, &ctx).await,
            Commands::Tools(args) => commands::tools::execute(args, &ctx).await,
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(categorize_error(&e))
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        "forge=debug"
    } else if cli.quiet {
        "forge=warn"
    } else {
        "forge=info"
    };

    let mut filter = EnvFilter::from_default_env();
    for directive in ["warn", level] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    let registry = tracing_subscriber::registry().with(filter);
    let log_result = if cli.log_json {
        registry.with(fmt::layer().json().with_writer(std::io::stderr)).try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };

    if log_result.is_err() {
        // Logging already initialized, continue
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    let invalid_input = e.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<VfsError>(),
            Some(
                VfsError::UnsupportedFormat(_)
                    | VfsError::InvalidConfig(_)
                    | VfsError::InvalidScript(_)
                    | VfsError::Json(_)
                    | VfsError::Yaml(_)
                    | VfsError::Toml(_)
            )
        ) || matches!(
            cause.downcast_ref::<ChatError>(),
            Some(ChatError::ToolNotFound(_) | ChatError::InvalidArguments { .. })
        )
    });

    if invalid_input {
        ExitCodes::INVALID_INPUT
    } else {
        ExitCodes::GENERAL_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_script_errors_map_to_invalid_input() {
        let err: anyhow::Result<()> = Err(VfsError::InvalidScript("bad".to_string()))
            .context("Failed to load event script");
        assert_eq!(categorize_error(&err.unwrap_err()), ExitCodes::INVALID_INPUT);

        let err = anyhow::Error::new(ChatError::ToolNotFound("deleteFile".to_string()));
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_INPUT);
    }

    #[tokio::test]
    async fn test_mistyped_tool_arguments_map_to_invalid_input() {
        use forge_chat::{shared, ToolBridge, ToolCallRecord, ToolCallStatus, ToolConfig};
        use forge_vfs::FileStore;

        let mut bridge = ToolBridge::new(shared(FileStore::new()), ToolConfig { write_settle_ms: 0 });
        let record = ToolCallRecord {
            tool: "writeToFile".to_string(),
            status: ToolCallStatus::InProgress,
            args: serde_json::json!({"path": 42}),
        };

        let err = bridge
            .handle(&record)
            .await
            .context("Tool call #1 (writeToFile) failed")
            .unwrap_err();

        assert_eq!(categorize_error(&err), ExitCodes::INVALID_INPUT);
    }

    #[test]
    fn test_io_errors_are_general() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = anyhow::Error::new(VfsError::Io(io));
        assert_eq!(categorize_error(&err), ExitCodes::GENERAL_ERROR);
    }
}
