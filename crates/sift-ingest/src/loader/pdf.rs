use std::path::Path;
use std::pin::Pin;

use super::LayoutLoader;
use crate::DEFAULT_MAX_FILE_SIZE;
use crate::error::IngestError;
use crate::types::{Block, DocumentLayout, Line, Page, Span};

/// Plain-text PDF loader backed by `pdf-extract`.
///
/// The extractor exposes no font geometry, so the whole document becomes one
/// page of body spans with zero font size. Such documents never classify a
/// heading and segment into a single default-titled chunk.
pub struct PdfLoader {
    pub max_file_size: u64,
}

impl Default for PdfLoader {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl LayoutLoader for PdfLoader {
    fn load(
        &self,
        path: &Path,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<DocumentLayout>, IngestError>> + Send + '_>> {
        let path = path.to_path_buf();
        let max_size = self.max_file_size;
        Box::pin(async move {
            let meta = tokio::fs::metadata(&path).await?;
            if meta.len() > max_size {
                return Err(IngestError::FileTooLarge(meta.len()));
            }

            let doc_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let path_buf = path.clone();
            let content = tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text(&path_buf).map_err(|e| IngestError::Pdf(e.to_string()))
            })
            .await
            .map_err(|e| IngestError::Io(std::io::Error::other(e)))??;

            let lines = content
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(|l| Line {
                    spans: vec![Span {
                        text: l.trim().to_owned(),
                        font_size: 0.0,
                        font_name: String::new(),
                    }],
                })
                .collect();

            Ok(vec![DocumentLayout {
                name: doc_name,
                pages: vec![Page {
                    blocks: vec![Block { lines }],
                }],
            }])
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }
}
