use destina_core::{critic_weights, CriterionTable, WeightVector};

use crate::error::WeightingError;
use crate::traits::WeightingStrategy;

/// Objective weights from variability and inter-criterion conflict.
#[derive(Debug, Clone, Copy, Default)]
pub struct CriticWeighting;

impl WeightingStrategy for CriticWeighting {
    fn name(&self) -> &'static str {
        "critic"
    }

    fn weigh(&self, table: &CriterionTable) -> Result<WeightVector, WeightingError> {
        Ok(critic_weights(table))
    }
}
