//! Application use cases / business logic

pub mod run;

pub use run::{RunConfig, RunError, RunPipeline};
