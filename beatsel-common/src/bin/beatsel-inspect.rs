//! Collection inspector (beatsel-inspect) - Main entry point
//!
//! Small maintenance tool: opens the collection database and prints every
//! collection with its membership count, plus the known beatmap cache.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use beatsel_common::{config, db};

/// Command-line arguments for beatsel-inspect
#[derive(Parser, Debug)]
#[command(name = "beatsel-inspect")]
#[command(about = "Inspect the beatsel collection database")]
#[command(version)]
struct Args {
    /// Root folder containing beatsel.db
    #[arg(short, long, env = "BEATSEL_ROOT")]
    root_folder: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beatsel_common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let cli_root = args.root_folder.as_ref().and_then(|p| p.to_str());
    let root = config::resolve_root_folder(cli_root)?;
    let db_path = config::database_path(&root);

    let pool = db::init_database(&db_path)
        .await
        .with_context(|| format!("opening {}", db_path.display()))?;

    let collections = db::collections::load_all(&pool).await?;
    println!("{} collections in {}", collections.len(), db_path.display());
    for collection in &collections {
        println!(
            "  {}  {:<32}  {} beatmaps",
            collection.id,
            collection.name,
            collection.member_count()
        );
    }

    let beatmaps = db::beatmaps::load_all(&pool).await?;
    println!("{} beatmaps in the identity cache", beatmaps.len());

    Ok(())
}
