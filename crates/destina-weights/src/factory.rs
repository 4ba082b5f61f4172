use std::sync::Arc;

use crate::config::WeightingConfig;
use crate::error::WeightingError;
use crate::providers::{CriticWeighting, EqualWeighting, ManualWeighting};
use crate::traits::WeightingStrategy;

pub fn build_weighting_strategy(
    cfg: WeightingConfig,
) -> Result<Arc<dyn WeightingStrategy>, WeightingError> {
    match cfg {
        WeightingConfig::Critic => Ok(Arc::new(CriticWeighting)),
        WeightingConfig::Equal => Ok(Arc::new(EqualWeighting)),
        WeightingConfig::Manual(c) => Ok(Arc::new(ManualWeighting::new(c)?)),
    }
}
