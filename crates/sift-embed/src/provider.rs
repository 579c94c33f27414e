use crate::error::EmbedError;

/// Text embedding backend. Vectors from one provider instance live in a
/// shared similarity space; the instance is immutable after construction and
/// safe to share across collections.
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts in one call, preserving input order.
    ///
    /// Batching is part of the contract: callers embed a whole corpus at
    /// once, and implementations must amortize per-call overhead.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or inference fails.
    fn embed_batch(
        &self,
        texts: &[String],
    ) -> impl Future<Output = Result<Vec<Vec<f32>>, EmbedError>> + Send;

    fn name(&self) -> &'static str;
}
