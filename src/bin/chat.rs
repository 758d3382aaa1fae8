//! Interactive chat binary
//!
//! Run with: cargo run --bin docent

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docent::chat::{ChatSession, TypingRenderer};
use docent::config::DocentConfig;
use docent::engine::QueryEngine;
use docent::providers::ollama::{self, OllamaEmbedder, OllamaGenerator};
use docent::retrieval::{ChunkStore, SemanticIndex};

#[derive(Parser)]
#[command(name = "docent", about = "Chat with your documents", version)]
struct Args {
    /// Path to the config file (default: ./docent.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Answer each query on its own, without forwarding the conversation
    /// history to the model
    #[arg(long)]
    stateless: bool,
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

    // Configuration problems are fatal: the chat loop is never entered.
    let config = DocentConfig::load(args.config.as_deref())?;
    let store = Arc::new(ChunkStore::open(
        &config.store,
        config.embedding.dimensions,
    )?);

    check_model(&config.embedding.base_url, &config.embedding.model).await?;
    check_model(&config.generation.base_url, &config.generation.model).await?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.embedding.model);
    tracing::info!("  - Generation model: {}", config.generation.model);
    tracing::info!("  - Top-K: {}", config.retrieval.top_k);
    tracing::info!(
        "  - Collection: {} ({} chunks from {} documents)",
        config.store.collection,
        store.len(),
        store.document_count()
    );

    if store.is_empty() {
        println!(
            "Note: the collection is empty. Run `docent-ingest <dir>` to add documents;\n\
             until then answers come from the model's general knowledge."
        );
    }

    let embedder = Arc::new(OllamaEmbedder::new(&config.embedding));
    let generator = Arc::new(OllamaGenerator::new(&config.generation));
    let index = Arc::new(SemanticIndex::new(
        embedder,
        store,
        generator.clone(),
        config.retrieval.similarity_floor,
    ));

    let engine = QueryEngine::new(index, generator, config.retrieval.top_k);
    let renderer = TypingRenderer::new(config.display.clone());

    let mut session = ChatSession::new(engine, renderer, !args.stateless);
    session.run().await?;

    Ok(())
}

/// A model missing from the Ollama catalog is a configuration error; an
/// unreachable daemon is only a warning, since per-query failures are
/// recovered at runtime.
async fn check_model(base_url: &str, model: &str) -> anyhow::Result<()> {
    match ollama::model_available(base_url, model).await? {
        Some(true) => Ok(()),
        Some(false) => anyhow::bail!(
            "model '{}' is not available at {} (try: ollama pull {})",
            model,
            base_url,
            model
        ),
        None => {
            tracing::warn!("Ollama not reachable at {}", base_url);
            tracing::warn!("Please start Ollama:");
            tracing::warn!("  1. Install: https://ollama.com/download");
            tracing::warn!("  2. Start: ollama serve");
            tracing::warn!("  3. Pull models: ollama pull {}", model);
            Ok(())
        }
    }
}
