//! Offline ingestion binary
//!
//! Run with: cargo run --bin docent-ingest -- ./docs

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docent::config::DocentConfig;
use docent::ingestion::{collect_files, FileOutcome, Ingestor, TextChunker};
use docent::providers::ollama::{self, OllamaEmbedder};
use docent::retrieval::ChunkStore;

#[derive(Parser)]
#[command(name = "docent-ingest", about = "Ingest documents into the collection", version)]
struct Args {
    /// Directory containing the documents to ingest
    #[arg(default_value = "./docs")]
    docs_dir: PathBuf,

    /// Path to the config file (default: ./docent.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = DocentConfig::load(args.config.as_deref())?;
    let store = Arc::new(ChunkStore::open(
        &config.store,
        config.embedding.dimensions,
    )?);

    match ollama::model_available(&config.embedding.base_url, &config.embedding.model).await? {
        Some(true) => {}
        Some(false) => anyhow::bail!(
            "embedding model '{}' is not available at {} (try: ollama pull {})",
            config.embedding.model,
            config.embedding.base_url,
            config.embedding.model
        ),
        None => anyhow::bail!(
            "Ollama is not reachable at {} - ingestion needs the embedding endpoint",
            config.embedding.base_url
        ),
    }

    if !args.docs_dir.exists() {
        std::fs::create_dir_all(&args.docs_dir)?;
        println!(
            "Created {}. Add your .txt/.md documents there and run this again.",
            args.docs_dir.display()
        );
        return Ok(());
    }

    let files = collect_files(&args.docs_dir)?;
    if files.is_empty() {
        println!(
            "No text documents found in {}. Add .txt/.md files and run again.",
            args.docs_dir.display()
        );
        return Ok(());
    }

    println!(
        "Ingesting {} file(s) from {} into collection '{}'",
        files.len(),
        args.docs_dir.display(),
        config.store.collection
    );

    let embedder = Arc::new(OllamaEmbedder::new(&config.embedding));
    let chunker = TextChunker::new(&config.chunking);
    let ingestor = Ingestor::new(embedder, store.clone(), chunker);

    let bar = ProgressBar::new(files.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("valid progress template"),
    );

    let mut ingested = 0usize;
    let mut skipped = 0usize;
    let mut chunks = 0usize;

    for path in &files {
        bar.set_message(
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );

        match ingestor.ingest_file(&args.docs_dir, path).await? {
            FileOutcome::Ingested(count) => {
                ingested += 1;
                chunks += count;
            }
            FileOutcome::SkippedUnchanged => skipped += 1,
            FileOutcome::Empty => {}
        }

        bar.inc(1);
    }

    bar.finish_and_clear();

    println!(
        "Done: {} file(s) ingested, {} unchanged, {} chunk(s) created.",
        ingested, skipped, chunks
    );
    println!(
        "Collection '{}' now holds {} chunks from {} documents.",
        config.store.collection,
        store.len(),
        store.document_count()
    );

    Ok(())
}
