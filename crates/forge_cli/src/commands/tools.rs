//! Tools command - Drive recorded tool calls through the tool bridge.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use tracing::{debug, info};

use forge_chat::{load_tool_script, shared, ToolBridge};
use forge_vfs::FileStore;

use super::Context;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct ToolsArgs {
    /// Recorded tool-call script
    script: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print the reply of every executed tool
    #[arg(long)]
    show_replies: bool,
}

pub async fn execute(args: ToolsArgs, ctx: &Context) -> Result<()> {
    info!("Replaying tool calls from {}", args.script.display());

    let records = load_tool_script(&args.script)
        .with_context(|| format!("Failed to load tool script {}", args.script.display()))?;

    let store = shared(FileStore::with_config(ctx.config.store.clone()));
    let mut bridge = ToolBridge::new(store.clone(), ctx.config.tools.clone());

    let mut executed = 0;
    for (index, record) in records.iter().enumerate() {
        let outcome = bridge
            .handle(record)
            .await
            .with_context(|| format!("Tool call #{} ({}) failed", index + 1, record.tool))?;

        debug!("{} {:?}: {} store action(s)", record.tool, record.status, outcome.actions.len());
        if let Some(reply) = outcome.reply {
            executed += 1;
            if args.show_replies {
                println!("🔧 {}: {}", record.tool, reply);
            }
        }
    }

    let store = store.lock();
    print!("{}", output::render(&store, args.format)?);

    if !ctx.quiet && args.format == OutputFormat::Text {
        println!();
        println!("🔧 {} tool call(s) executed from {} snapshot(s)", executed, records.len());
        println!("   {}", output::summary(&store.stats()));
    }

    Ok(())
}
