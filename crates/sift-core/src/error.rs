use std::path::PathBuf;

use sift_embed::EmbedError;
use sift_ingest::IngestError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to read request file {path}: {source}")]
    Request {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed request file {path}: {source}")]
    RequestParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to read documents from {path}: {source}")]
    Documents {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write output {path}: {source}")]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("result serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Embed(#[from] EmbedError),

    #[error("run cancelled")]
    Cancelled,
}
