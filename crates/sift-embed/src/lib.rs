//! Embedding provider abstraction and backend implementations.

pub mod any;
#[cfg(feature = "candle")]
pub mod candle;
pub mod error;
#[cfg(feature = "mock")]
pub mod mock;
pub mod ollama;
pub mod provider;
pub mod similarity;

pub use any::AnyEmbedder;
pub use error::EmbedError;
pub use ollama::OllamaEmbedder;
pub use provider::Embedder;
pub use similarity::cosine_similarity;

#[cfg(feature = "candle")]
pub use candle::CandleEmbedder;
#[cfg(feature = "candle")]
pub use candle_core::Device;
#[cfg(feature = "mock")]
pub use mock::MockEmbedder;
