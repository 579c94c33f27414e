use std::path::Path;
use std::pin::Pin;

use super::LayoutLoader;
use crate::DEFAULT_MAX_FILE_SIZE;
use crate::error::IngestError;
use crate::types::DocumentLayout;

/// Loads the JSON layout interchange format produced by an external
/// extractor: `{"pages": [{"blocks": [{"lines": [{"spans": [...]}]}]}]}`.
pub struct JsonLayoutLoader {
    pub max_file_size: u64,
}

impl Default for JsonLayoutLoader {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl LayoutLoader for JsonLayoutLoader {
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

            let raw = tokio::fs::read_to_string(&path).await?;
            let mut layout: DocumentLayout =
                serde_json::from_str(&raw).map_err(|source| IngestError::Layout {
                    path: path.display().to_string(),
                    source,
                })?;

            // The file name identifies the document regardless of what the
            // extractor wrote into the layout.
            layout.name = doc_name;
            Ok(vec![layout])
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_layout(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let file = dir.join(name);
        std::fs::write(&file, body).unwrap();
        file
    }

    #[tokio::test]
    async fn load_layout_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_layout(
            dir.path(),
            "doc.json",
            r#"{"pages":[{"blocks":[{"lines":[{"spans":[{"text":"Hi","font_size":12.0,"font_name":"Helvetica"}]}]}]}]}"#,
        );

        let docs = JsonLayoutLoader::default().load(&file).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name, "doc.json");
        assert_eq!(docs[0].pages.len(), 1);
        assert_eq!(docs[0].pages[0].blocks[0].lines[0].spans[0].text, "Hi");
    }

    #[tokio::test]
    async fn span_style_fields_default() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_layout(
            dir.path(),
            "bare.json",
            r#"{"pages":[{"blocks":[{"lines":[{"spans":[{"text":"plain"}]}]}]}]}"#,
        );

        let docs = JsonLayoutLoader::default().load(&file).await.unwrap();
        let span = &docs[0].pages[0].blocks[0].lines[0].spans[0];
        assert_eq!(span.font_size, 0.0);
        assert!(span.font_name.is_empty());
    }

    #[tokio::test]
    async fn malformed_layout_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_layout(dir.path(), "broken.json", "{not json");

        let err = JsonLayoutLoader::default().load(&file).await.unwrap_err();
        match err {
            IngestError::Layout { path, .. } => assert!(path.ends_with("broken.json")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn nonexistent_file_errors() {
        let result = JsonLayoutLoader::default()
            .load(Path::new("/nonexistent/doc.json"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn file_too_large_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_layout(dir.path(), "big.json", r#"{"pages":[]}"#);

        let loader = JsonLayoutLoader { max_file_size: 0 };
        let result = loader.load(&file).await;
        assert!(matches!(result, Err(IngestError::FileTooLarge(_))));
    }

    #[test]
    fn supported_extensions_list() {
        assert_eq!(JsonLayoutLoader::default().supported_extensions(), &["json"]);
    }
}
