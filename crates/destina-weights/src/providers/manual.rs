use destina_core::{CriterionTable, EngineError, WeightBasis, WeightVector};
use tracing::warn;

use crate::config::ManualWeightsConfig;
use crate::error::WeightingError;
use crate::traits::WeightingStrategy;

const SUM_TOLERANCE: f64 = 1e-6;

/// Caller-chosen weights, renormalized to sum to one.
#[derive(Debug, Clone)]
pub struct ManualWeighting {
    weights: Vec<(String, f64)>,
}

impl ManualWeighting {
    pub fn new(config: ManualWeightsConfig) -> Result<Self, WeightingError> {
        if config.weights.is_empty() {
            return Err(WeightingError::Config(
                "manual weights are empty".to_string(),
            ));
        }
        if let Some((name, value)) = config
            .weights
            .iter()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(WeightingError::Config(format!(
                "manual weight for `{name}` must be finite and non-negative, got {value}"
            )));
        }

        let total = config.weights.values().sum::<f64>();
        if total <= 0.0 {
            return Err(WeightingError::Config(
                "manual weights sum to zero".to_string(),
            ));
        }
        if (total - 1.0).abs() > SUM_TOLERANCE {
            warn!(total, "manual weights do not sum to 1, renormalizing");
        }

        Ok(Self {
            weights: config
                .weights
                .into_iter()
                .map(|(name, w)| (name, w / total))
                .collect(),
        })
    }

    pub fn weights(&self) -> &[(String, f64)] {
        &self.weights
    }
}

impl WeightingStrategy for ManualWeighting {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn weigh(&self, table: &CriterionTable) -> Result<WeightVector, WeightingError> {
        if let Some((missing, _)) = self
            .weights
            .iter()
            .find(|(name, _)| table.criterion_index(name).is_none())
        {
            return Err(EngineError::MissingCriterion(missing.clone()).into());
        }

        Ok(WeightVector::from_pairs(
            table.criteria().iter().map(|c| {
                let w = self
                    .weights
                    .iter()
                    .find(|(name, _)| name == c)
                    .map_or(0.0, |(_, w)| *w);
                (c.clone(), w)
            }),
            WeightBasis::Manual,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CriterionTable {
        CriterionTable::from_rows(
            ["Price", "Rating", "Time_Minutes"],
            [
                ("a", vec![20_000.0, 4.5, 60.0]),
                ("b", vec![0.0, 4.2, 90.0]),
            ],
        )
        .expect("table")
    }

    #[test]
    fn keeps_weights_that_already_sum_to_one() {
        let m = ManualWeighting::new(ManualWeightsConfig::new([
            ("Price", 0.45),
            ("Rating", 0.35),
            ("Time_Minutes", 0.20),
        ]))
        .expect("manual");
        let w = m.weigh(&table()).expect("weigh");
        assert_eq!(w.basis(), WeightBasis::Manual);
        assert!((w.get("Price").unwrap_or_default() - 0.45).abs() < 1e-12);
        assert!((w.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn renormalizes_and_zero_fills() {
        let m = ManualWeighting::new(ManualWeightsConfig::new([("Price", 3.0), ("Rating", 1.0)]))
            .expect("manual");
        let w = m.weigh(&table()).expect("weigh");
        assert!((w.get("Price").unwrap_or_default() - 0.75).abs() < 1e-12);
        assert_eq!(w.get("Time_Minutes"), Some(0.0));
        let names = w.iter().map(|(n, _)| n).collect::<Vec<_>>();
        assert_eq!(names, vec!["Price", "Rating", "Time_Minutes"]);
    }

    #[test]
    fn unknown_criterion_is_an_engine_error() {
        let m = ManualWeighting::new(ManualWeightsConfig::new([("Distance", 1.0)]))
            .expect("manual");
        let err = m.weigh(&table()).unwrap_err();
        assert!(matches!(
            err,
            WeightingError::Engine(EngineError::MissingCriterion(ref c)) if c == "Distance"
        ));
    }

    #[test]
    fn rejects_degenerate_configs() {
        assert!(ManualWeighting::new(ManualWeightsConfig::default()).is_err());
        assert!(ManualWeighting::new(ManualWeightsConfig::new([("Price", 0.0)])).is_err());
        assert!(ManualWeighting::new(ManualWeightsConfig::new([("Price", -1.0)])).is_err());
        assert!(ManualWeighting::new(ManualWeightsConfig::new([("Price", f64::NAN)])).is_err());
    }
}
