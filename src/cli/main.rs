//! CLI binary entry point for poi-import-cli

use clap::Parser;
use poi_import_sdk::import::ImportPipeline;
use poi_import_sdk::store::MemoryStore;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "poi-import-cli")]
#[command(about = "Import Point of Interest data from CSV, JSON, or XML sources")]
#[command(version)]
struct Cli {
    /// Path(s) or URL(s) of the file(s) to import
    #[arg(required = true)]
    sources: Vec<String>,

    /// Update existing records instead of skipping them
    #[arg(long)]
    update: bool,
}

fn main() {
    // Log level via RUST_LOG, default warn so record-level skips surface
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let store = MemoryStore::new();
    let pipeline = ImportPipeline::new(&store, cli.update);
    let report = pipeline.run(&cli.sources);

    for source in &report.sources {
        match &source.result {
            Ok(stats) => println!("{}: {}", source.source, stats),
            Err(e) => eprintln!("Error processing {}: {}", source.source, e),
        }
    }

    println!();
    println!("Total: {}", report.totals);
}
