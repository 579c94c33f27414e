//! Collection pipeline: configuration, request/result schemas, and the batch
//! runner that ties segmentation, ranking, and filtering together.

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod request;

pub use config::{Config, FilterProfile};
pub use error::PipelineError;
pub use output::{CollectionResult, assemble};
pub use pipeline::{BatchRunner, BatchSummary, CollectionOutcome};
pub use request::{CollectionRequest, Job, Persona};
