use destina_core::{CriterionTable, WeightBasis, WeightVector};

use crate::error::WeightingError;
use crate::traits::WeightingStrategy;

#[derive(Debug, Clone, Copy, Default)]
pub struct EqualWeighting;

impl WeightingStrategy for EqualWeighting {
    fn name(&self) -> &'static str {
        "equal"
    }

    fn weigh(&self, table: &CriterionTable) -> Result<WeightVector, WeightingError> {
        Ok(WeightVector::uniform(
            table.criteria().iter().cloned(),
            WeightBasis::Equal,
        ))
    }
}
