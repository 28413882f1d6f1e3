//! Replay command - Apply a file event script to a fresh store.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use tracing::{info, warn};

use forge_vfs::{load_script, FileStore};

use super::Context;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct ReplayArgs {
    /// Event script to replay
    script: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

pub async fn execute(args: ReplayArgs, ctx: &Context) -> Result<()> {
    info!("Replaying events from {}", args.script.display());

    let events = load_script(&args.script)
        .with_context(|| format!("Failed to load event script {}", args.script.display()))?;

    let mut store = FileStore::with_config(ctx.config.store.clone());
    let applied = store.apply_all(&events);
    if applied < events.len() {
        warn!("{} of {} events were ignored", events.len() - applied, events.len());
    }

    print!("{}", output::render(&store, args.format)?);

    if !ctx.quiet && args.format == OutputFormat::Text {
        println!();
        println!("📦 {} event(s) applied", applied);
        println!("   {}", output::summary(&store.stats()));
    }

    Ok(())
}
