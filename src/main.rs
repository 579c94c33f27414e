use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use sift_core::{BatchRunner, Config};
use sift_embed::{AnyEmbedder, Embedder, OllamaEmbedder};
use sift_ingest::CancelToken;

#[derive(Debug, Parser)]
#[command(
    name = "sift",
    version,
    about = "Persona-driven section extraction and relevance ranking over document collections"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "sift.toml")]
    config: PathBuf,

    /// Base directory holding collection folders.
    #[arg(long)]
    base: Option<PathBuf>,

    /// Number of sections to extract per collection.
    #[arg(long)]
    top_n: Option<usize>,

    /// Embedding provider: ollama, candle, or mock (feature-gated).
    #[arg(long)]
    provider: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let mut config = Config::load(&cli.config)?;
    if let Some(base) = cli.base {
        config.corpus.base_path = base.display().to_string();
    }
    if let Some(top_n) = cli.top_n {
        config.ranking.top_n = top_n;
    }
    if let Some(provider) = cli.provider {
        config.embedding.provider = provider;
    }

    let embedder = create_embedder(&config)?;
    tracing::info!(
        provider = embedder.name(),
        model = %config.embedding.model,
        "embedding provider ready"
    );

    let base = PathBuf::from(&config.corpus.base_path);
    anyhow::ensure!(
        base.is_dir(),
        "base path {} is not a directory",
        base.display()
    );

    let cancel = CancelToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e:#}");
            return;
        }
        tracing::info!("received shutdown signal");
        signal_cancel.cancel();
    });

    let runner = BatchRunner::new(config, embedder, cancel);
    let summary = runner.run(&base).await.context("batch run failed")?;
    tracing::info!(
        processed = summary.processed,
        skipped = summary.skipped,
        failed = summary.failed,
        "all collections processed"
    );
    Ok(())
}

fn create_embedder(config: &Config) -> anyhow::Result<AnyEmbedder> {
    match config.embedding.provider.as_str() {
        "ollama" => Ok(AnyEmbedder::Ollama(OllamaEmbedder::new(
            &config.embedding.base_url,
            config.embedding.model.clone(),
        ))),
        #[cfg(feature = "candle")]
        "candle" => {
            let model = &config.embedding.model;
            // Bare model names resolve under the sentence-transformers org.
            let repo_id = if model.contains('/') {
                model.clone()
            } else {
                format!("sentence-transformers/{model}")
            };
            let embedder = sift_embed::CandleEmbedder::load(&repo_id, &sift_embed::Device::Cpu)
                .context("failed to load candle embedding model")?;
            Ok(AnyEmbedder::Candle(embedder))
        }
        #[cfg(feature = "mock")]
        "mock" => Ok(AnyEmbedder::Mock(sift_embed::MockEmbedder::default())),
        other => bail!("unknown embedding provider: {other}"),
    }
}
