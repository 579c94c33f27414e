use sift_embed::{EmbedError, Embedder, cosine_similarity};
use sift_ingest::Chunk;

/// A chunk paired with its cosine similarity against the query embedding.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub score: f32,
    pub chunk: Chunk,
}

/// Score every chunk against the query and return them in descending score
/// order. Ties keep their extraction order (stable sort).
///
/// The query gets one embedding call and the chunk texts one batched call.
/// Callers must not pass an empty slice; an empty corpus is a collection-level
/// skip, decided before ranking.
///
/// # Errors
///
/// Returns an error if the embedding provider fails or returns the wrong
/// number of vectors.
pub async fn rank<E: Embedder>(
    embedder: &E,
    query: &str,
    chunks: &[Chunk],
) -> Result<Vec<ScoredChunk>, EmbedError> {
    let query_texts = [query.to_owned()];
    let query_vec = embedder
        .embed_batch(&query_texts)
        .await?
        .into_iter()
        .next()
        .ok_or(EmbedError::EmptyResponse { provider: "query" })?;

    let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
    let vectors = embedder.embed_batch(&texts).await?;
    if vectors.len() != chunks.len() {
        return Err(EmbedError::CountMismatch {
            got: vectors.len(),
            expected: chunks.len(),
        });
    }

    let mut scored: Vec<ScoredChunk> = chunks
        .iter()
        .zip(vectors)
        .map(|(chunk, vector)| ScoredChunk {
            score: cosine_similarity(&query_vec, &vector),
            chunk: chunk.clone(),
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    tracing::debug!(chunks = scored.len(), provider = embedder.name(), "ranked chunks");
    Ok(scored)
}
