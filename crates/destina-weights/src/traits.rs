use destina_core::{CriterionTable, WeightVector};

use crate::error::WeightingError;

pub trait WeightingStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn weigh(&self, table: &CriterionTable) -> Result<WeightVector, WeightingError>;
}
