//! Document layout ingestion and heading-driven segmentation.

pub mod cancel;
pub mod error;
pub mod loader;
pub mod segment;
pub mod types;

pub use cancel::CancelToken;
pub use error::IngestError;
pub use loader::{JsonLayoutLoader, LayoutLoader};
pub use segment::{Segmenter, SegmenterConfig};
pub use types::{Block, Chunk, DocumentLayout, Line, Page, Span};

#[cfg(feature = "pdf")]
pub use loader::PdfLoader;

/// Default maximum file size: 50 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;
