#[cfg(feature = "candle")]
use crate::candle::CandleEmbedder;
#[cfg(feature = "mock")]
use crate::mock::MockEmbedder;
use crate::ollama::OllamaEmbedder;

use crate::error::EmbedError;
use crate::provider::Embedder;

/// Generates a match over all `AnyEmbedder` variants, binding the inner
/// embedder and evaluating the given closure for each arm.
macro_rules! delegate_embedder {
    ($self:expr, |$e:ident| $expr:expr) => {
        match $self {
            AnyEmbedder::Ollama($e) => $expr,
            #[cfg(feature = "candle")]
            AnyEmbedder::Candle($e) => $expr,
            #[cfg(feature = "mock")]
            AnyEmbedder::Mock($e) => $expr,
        }
    };
}

#[derive(Debug, Clone)]
pub enum AnyEmbedder {
    Ollama(OllamaEmbedder),
    #[cfg(feature = "candle")]
    Candle(CandleEmbedder),
    #[cfg(feature = "mock")]
    Mock(MockEmbedder),
}

impl Embedder for AnyEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        delegate_embedder!(self, |e| e.embed_batch(texts).await)
    }

    fn name(&self) -> &'static str {
        delegate_embedder!(self, |e| e.name())
    }
}
