mod json;
#[cfg(feature = "pdf")]
mod pdf;

pub use json::JsonLayoutLoader;
#[cfg(feature = "pdf")]
pub use pdf::PdfLoader;

use std::path::Path;
use std::pin::Pin;

use crate::error::IngestError;
use crate::types::DocumentLayout;

/// Source of document layouts. Implementations adapt one on-disk format to
/// the page/block/span model the segmenter consumes.
pub trait LayoutLoader: Send + Sync {
    fn load(
        &self,
        path: &Path,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<DocumentLayout>, IngestError>> + Send + '_>>;

    fn supported_extensions(&self) -> &[&str];
}
