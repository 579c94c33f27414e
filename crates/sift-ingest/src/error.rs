#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file too large: {0} bytes")]
    FileTooLarge(u64),

    #[error("malformed layout in {path}: {source}")]
    Layout {
        path: String,
        source: serde_json::Error,
    },

    #[cfg(feature = "pdf")]
    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("segmentation cancelled")]
    Cancelled,
}
