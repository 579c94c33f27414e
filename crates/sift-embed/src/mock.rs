//! Test-only deterministic embedder.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::error::EmbedError;
use crate::provider::Embedder;

/// Deterministic embedder for tests: texts sharing words score higher under
/// cosine similarity. Exact vectors can be pinned per text when a test needs
/// full control over the ranking.
#[derive(Debug, Clone)]
pub struct MockEmbedder {
    dim: usize,
    pinned: HashMap<String, Vec<f32>>,
    pub fail: bool,
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self {
            dim: 16,
            pinned: HashMap::new(),
            fail: false,
        }
    }
}

impl MockEmbedder {
    /// Hashed-vector dimensionality, clamped to at least 1.
    #[must_use]
    pub fn with_dim(mut self, dim: usize) -> Self {
        self.dim = dim.max(1);
        self
    }

    #[must_use]
    pub fn with_vector(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.pinned.insert(text.into(), vector);
        self
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn encode(&self, text: &str) -> Vec<f32> {
        if let Some(pinned) = self.pinned.get(text) {
            return pinned.clone();
        }

        // Bag-of-words hashed into `dim` buckets, L2-normalized.
        let mut vector = vec![0.0_f32; self.dim];
        for word in text.to_lowercase().split_whitespace() {
            let mut hasher = DefaultHasher::new();
            word.hash(&mut hasher);
            let bucket = usize::try_from(hasher.finish() % self.dim as u64).unwrap_or(0);
            vector[bucket] += 1.0;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        vector
    }
}

impl Embedder for MockEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        if self.fail {
            return Err(EmbedError::Other("mock embed error".into()));
        }
        Ok(texts.iter().map(|t| self.encode(t)).collect())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
