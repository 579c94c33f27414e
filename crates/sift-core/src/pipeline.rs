use std::path::{Path, PathBuf};
use std::time::Instant;

use sift_embed::Embedder;
use sift_ingest::{CancelToken, Chunk, IngestError, JsonLayoutLoader, LayoutLoader, Segmenter};
use sift_rank::{apply_denylist, rank};

use crate::config::Config;
use crate::error::PipelineError;
use crate::output::assemble;
use crate::request::CollectionRequest;

#[derive(Debug)]
pub enum CollectionOutcome {
    /// Output artifact written to this path.
    Written(PathBuf),
    /// No chunks extracted; the collection was skipped without an artifact.
    SkippedEmpty,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Runs the segment → rank → filter → assemble pipeline over every
/// collection under a base directory, strictly sequentially.
///
/// The embedder is constructed once by the caller and shared read-only across
/// collections. Failures are scoped: a bad document loses that document, a
/// bad request or output path loses that collection, and only an unreadable
/// base directory fails the batch.
pub struct BatchRunner<E> {
    config: Config,
    embedder: E,
    segmenter: Segmenter,
    loaders: Vec<Box<dyn LayoutLoader>>,
    cancel: CancelToken,
}

impl<E: Embedder> BatchRunner<E> {
    #[must_use]
    pub fn new(config: Config, embedder: E, cancel: CancelToken) -> Self {
        let segmenter = Segmenter::new(config.segmenter.clone());
        #[allow(unused_mut)]
        let mut loaders: Vec<Box<dyn LayoutLoader>> = vec![Box::new(JsonLayoutLoader::default())];
        #[cfg(feature = "pdf")]
        loaders.push(Box::new(sift_ingest::PdfLoader::default()));

        Self {
            config,
            embedder,
            segmenter,
            loaders,
            cancel,
        }
    }

    /// Process every collection folder under `base` in sorted order.
    ///
    /// # Errors
    ///
    /// Returns an error only if `base` cannot be enumerated; per-collection
    /// failures are logged and counted in the summary.
    pub async fn run(&self, base: &Path) -> Result<BatchSummary, PipelineError> {
        let collections = self.discover_collections(base).await?;
        tracing::info!(count = collections.len(), base = %base.display(), "discovered collections");

        let mut summary = BatchSummary::default();
        for path in collections {
            if self.cancel.is_cancelled() {
                tracing::warn!("cancellation requested, stopping batch");
                break;
            }
            match self.process_collection(&path).await {
                Ok(CollectionOutcome::Written(output)) => {
                    tracing::info!(output = %output.display(), "result saved");
                    summary.processed += 1;
                }
                Ok(CollectionOutcome::SkippedEmpty) => summary.skipped += 1,
                Err(PipelineError::Cancelled) => {
                    tracing::warn!("cancellation requested, stopping batch");
                    break;
                }
                Err(e) => {
                    tracing::error!(collection = %path.display(), error = %e, "collection failed");
                    summary.failed += 1;
                }
            }
        }
        Ok(summary)
    }

    async fn discover_collections(&self, base: &Path) -> Result<Vec<PathBuf>, PipelineError> {
        let map_err = |source| PipelineError::Documents {
            path: base.to_path_buf(),
            source,
        };

        let mut entries = tokio::fs::read_dir(base).await.map_err(map_err)?;
        let mut collections = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(map_err)? {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if path.is_dir() && name.starts_with(&self.config.corpus.collection_prefix) {
                collections.push(path);
            }
        }
        collections.sort();
        Ok(collections)
    }

    /// Run the full pipeline for one collection folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the request file is unreadable or malformed, the
    /// documents folder cannot be enumerated, embedding fails, or the output
    /// cannot be written. Individual document failures are absorbed.
    pub async fn process_collection(
        &self,
        path: &Path,
    ) -> Result<CollectionOutcome, PipelineError> {
        let started = Instant::now();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        tracing::info!(collection = %name, "processing collection");

        let request_path = path.join(&self.config.corpus.request_file);
        let raw = tokio::fs::read_to_string(&request_path)
            .await
            .map_err(|source| PipelineError::Request {
                path: request_path.clone(),
                source,
            })?;
        let request: CollectionRequest =
            serde_json::from_str(&raw).map_err(|source| PipelineError::RequestParse {
                path: request_path.clone(),
                source,
            })?;

        let docs_dir = path.join(&self.config.corpus.documents_dir);
        let chunks = self.collect_chunks(&docs_dir).await?;
        if chunks.is_empty() {
            tracing::warn!(collection = %name, "no text chunks extracted, skipping");
            return Ok(CollectionOutcome::SkippedEmpty);
        }
        tracing::info!(collection = %name, chunks = chunks.len(), "finished parsing");

        let query = request.query();
        let mut ranked = rank(&self.embedder, &query, &chunks).await?;

        if let Some(denylist) = self.config.denylist_for(&name) {
            let total = ranked.len();
            ranked = apply_denylist(ranked, denylist);
            tracing::info!(collection = %name, kept = ranked.len(), total, "applied filter profile");
        }

        for (i, scored) in ranked.iter().take(5).enumerate() {
            tracing::info!(
                rank = i + 1,
                score = format!("{:.4}", scored.score),
                doc = %scored.chunk.doc_name,
                title = %scored.chunk.section_title,
                "top section"
            );
        }

        let result = assemble(
            &chunks,
            &ranked,
            &request.persona,
            &request.job_to_be_done,
            self.config.ranking.top_n,
        );
        let json = serde_json::to_string_pretty(&result)?;
        let output_path = path.join(&self.config.corpus.output_file);
        tokio::fs::write(&output_path, json)
            .await
            .map_err(|source| PipelineError::Output {
                path: output_path.clone(),
                source,
            })?;

        tracing::info!(
            collection = %name,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "collection processed"
        );
        Ok(CollectionOutcome::Written(output_path))
    }

    /// Segment every supported document in the folder, in sorted file order.
    /// A document that fails to load or segment is dropped with a warning;
    /// the rest of the collection proceeds.
    async fn collect_chunks(&self, docs_dir: &Path) -> Result<Vec<Chunk>, PipelineError> {
        let map_err = |source| PipelineError::Documents {
            path: docs_dir.to_path_buf(),
            source,
        };

        let mut entries = tokio::fs::read_dir(docs_dir).await.map_err(map_err)?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(map_err)? {
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        let mut chunks = Vec::new();
        for file in files {
            if self.cancel.is_cancelled() {
                return Err(PipelineError::Cancelled);
            }
            let ext = file
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_lowercase();
            let Some(loader) = self
                .loaders
                .iter()
                .find(|l| l.supported_extensions().contains(&ext.as_str()))
            else {
                tracing::debug!(file = %file.display(), "no loader for extension, skipping");
                continue;
            };

            match self.segment_document(loader.as_ref(), &file).await {
                Ok(mut doc_chunks) => chunks.append(&mut doc_chunks),
                Err(IngestError::Cancelled) => return Err(PipelineError::Cancelled),
                Err(e) => {
                    tracing::warn!(file = %file.display(), error = %e, "failed to ingest document, skipping");
                }
            }
        }
        Ok(chunks)
    }

    async fn segment_document(
        &self,
        loader: &dyn LayoutLoader,
        file: &Path,
    ) -> Result<Vec<Chunk>, IngestError> {
        let layouts = loader.load(file).await?;
        let mut chunks = Vec::new();
        for layout in &layouts {
            chunks.extend(self.segmenter.segment(layout, &self.cancel)?);
        }
        Ok(chunks)
    }
}
