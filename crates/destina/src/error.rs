use destina_core::EngineError;
use destina_weights::WeightingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("weighting error: {0}")]
    Weighting(#[from] WeightingError),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}
