pub mod config;
pub mod error;
pub mod pipeline;

pub use config::*;
pub use destina_core::*;
pub use destina_weights::providers::{CriticWeighting, EqualWeighting, ManualWeighting};
pub use destina_weights::{
    build_weighting_strategy, ManualWeightsConfig, WeightingConfig, WeightingError,
    WeightingStrategy,
};
pub use error::PipelineError;
pub use pipeline::*;
