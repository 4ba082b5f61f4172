use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    InsufficientRows,
    NoCriteria,
    NoInformation,
}

/// Where a [`WeightVector`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "reason")]
pub enum WeightBasis {
    Critic,
    Equal,
    Manual,
    /// CRITIC could not discriminate and degraded to `1/k`.
    Uniform(FallbackReason),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionWeight {
    pub criterion: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    entries: Vec<CriterionWeight>,
    basis: WeightBasis,
}

impl WeightVector {
    pub fn from_pairs<I, S>(pairs: I, basis: WeightBasis) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(criterion, weight)| CriterionWeight {
                    criterion: criterion.into(),
                    weight,
                })
                .collect(),
            basis,
        }
    }

    pub fn uniform<I, S>(criteria: I, basis: WeightBasis) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = criteria.into_iter().map(Into::into).collect::<Vec<String>>();
        let share = if names.is_empty() {
            0.0
        } else {
            1.0 / names.len() as f64
        };
        Self::from_pairs(names.into_iter().map(|name| (name, share)), basis)
    }

    pub fn get(&self, criterion: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.criterion == criterion)
            .map(|e| e.weight)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|e| (e.criterion.as_str(), e.weight))
    }

    pub fn entries(&self) -> &[CriterionWeight] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    pub fn basis(&self) -> WeightBasis {
        self.basis
    }

    /// True when the weights carry no information about the data.
    pub fn is_fallback(&self) -> bool {
        matches!(self.basis, WeightBasis::Uniform(_))
    }

    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.entries
            .iter()
            .map(|e| (e.criterion.clone(), e.weight))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_splits_evenly() {
        let w = WeightVector::uniform(
            ["Price", "Rating", "Time_Minutes"],
            WeightBasis::Equal,
        );
        assert_eq!(w.len(), 3);
        assert!((w.total() - 1.0).abs() < 1e-12);
        assert_eq!(w.get("Rating"), Some(1.0 / 3.0));
        assert!(!w.is_fallback());
    }

    #[test]
    fn uniform_over_nothing_is_empty() {
        let w = WeightVector::uniform(
            Vec::<String>::new(),
            WeightBasis::Uniform(FallbackReason::NoCriteria),
        );
        assert!(w.is_empty());
        assert!(w.is_fallback());
    }

    #[test]
    fn basis_serializes_with_reason() {
        let basis = WeightBasis::Uniform(FallbackReason::InsufficientRows);
        let json = serde_json::to_string(&basis).expect("serialize");
        assert_eq!(json, r#"{"kind":"uniform","reason":"insufficient_rows"}"#);
    }
}
