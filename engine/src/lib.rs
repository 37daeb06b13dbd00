// Indicator and signal pipeline for a single instrument's daily price history.

pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod pipeline;
pub mod signals;

pub use error::EngineError;
pub use pipeline::PipelineOrchestrator;
