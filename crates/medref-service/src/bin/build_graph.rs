//! Interaction graph builder.
//!
//! Converts DDInter CSV downloads into the static interaction graph served
//! by `medref-server`.
//!
//! Usage:
//!   medref-build-graph <ddinter-dir> [--medications <path>] [--out <path>]

use std::path::PathBuf;

use clap::Parser;
use medref_loader::{
    discover_ddinter_files, load_ddinter_rows, load_ddinter_rows_parallel, load_medications,
    write_interaction_graph, GraphBuilder, SynonymIndex,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "medref-build-graph")]
#[command(version)]
#[command(about = "Build the static interaction graph from DDInter CSV downloads", long_about = None)]
struct Cli {
    /// Directory holding ddinter_downloads_code_*.csv files
    ddinter_dir: PathBuf,

    /// Medication dataset used to resolve DDInter drug names
    #[arg(long, default_value = "data/medications.json")]
    medications: PathBuf,

    /// Output path of the graph artifact
    #[arg(long, default_value = "data/interactions.json")]
    out: PathBuf,

    /// Parse files one at a time instead of in parallel
    #[arg(long)]
    sequential: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let records = load_medications(&cli.medications)?;
    let index = SynonymIndex::build(&records);
    tracing::info!(
        "Loaded {} medications ({} synonyms) from {}",
        records.len(),
        index.len(),
        cli.medications.display()
    );

    let files = discover_ddinter_files(&cli.ddinter_dir)?;
    tracing::info!("Discovered {} DDInter files in {}", files.len(), cli.ddinter_dir.display());

    let groups = if cli.sequential {
        load_ddinter_rows(&files)?
    } else {
        load_ddinter_rows_parallel(&files)?
    };

    let mut builder = GraphBuilder::new(&index).with_names(&records);
    for (code, rows) in &groups {
        let matched = builder.ingest_all(rows);
        builder.add_download_code(code.as_str());
        tracing::info!(code = %code, rows = rows.len(), matched, "Ingested DDInter file");
    }

    tracing::info!(
        "Matched {} medication pairs from {} rows",
        builder.matched_pairs(),
        builder.total_rows()
    );

    let mut graph = builder.build();
    graph.check_symmetry()?;
    if let Some(meta) = graph.meta.as_mut() {
        meta.generated_at = Some(chrono::Utc::now().to_rfc3339());
    }

    write_interaction_graph(&cli.out, &graph)?;
    tracing::info!(
        "Wrote {} pairs across {} medications to {}",
        graph.pair_count(),
        graph.node_count(),
        cli.out.display()
    );

    Ok(())
}
