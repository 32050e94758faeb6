//! Catalog maintenance CLI: upload, list and clear gallery artwork.
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use gallery_catalog::{CatalogStore, LegacyPlacementRule};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gallery-catalog")]
#[command(about = "Manage the artwork catalog served to the corridor gallery")]
struct Cli {
    /// Asset root holding `data/` and `uploads/`
    #[arg(long, default_value = "gallery-render-engine/assets")]
    root: PathBuf,

    /// Stamp a fixed wall and depth on new uploads (legacy gallery layout)
    #[arg(long)]
    legacy_positions: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Copy images into the gallery and append them to the catalog
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the catalog in insertion order
    List {
        /// Print the raw catalog document
        #[arg(long)]
        json: bool,
    },
    /// Remove every artwork and uploaded file
    Clear,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut store = CatalogStore::open(&cli.root);
    if cli.legacy_positions {
        store = store.with_legacy_positions(LegacyPlacementRule::default());
    }

    match cli.command {
        Command::Upload { files } => upload(&store, &files),
        Command::List { json } => list(&store, json),
        Command::Clear => {
            store
                .clear()
                .with_context(|| format!("failed to clear gallery at {}", cli.root.display()))?;
            println!("Gallery cleared");
            Ok(())
        }
    }
}

fn upload(store: &CatalogStore, files: &[PathBuf]) -> Result<()> {
    // One bad file must not stop the rest of the batch.
    let mut failed = 0;
    for file in files {
        match store.upload(file) {
            Ok(record) => println!("#{:<4} {}", record.id, record.image),
            Err(e) => {
                error!("{e}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} uploads failed", files.len());
    }
    Ok(())
}

fn list(store: &CatalogStore, json: bool) -> Result<()> {
    let catalog = store
        .load()
        .with_context(|| format!("failed to read {}", store.data_path().display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    if catalog.is_empty() {
        println!("Gallery is empty");
        return Ok(());
    }

    for record in catalog.list() {
        let placement = match record.legacy_placement() {
            Some((wall, depth)) => format!("{:<5} z={depth:.1}", wall.as_str()),
            None => "auto".to_string(),
        };
        println!("#{:<4} {:<12} {}", record.id, placement, record.image);
    }
    Ok(())
}
