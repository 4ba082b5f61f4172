use destina_core::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeightingError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}
