//! Relevance ranking of document chunks against a persona query.

pub mod filter;
pub mod ranker;

pub use filter::apply_denylist;
pub use ranker::{ScoredChunk, rank};
