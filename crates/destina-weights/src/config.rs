use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::WeightingError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManualWeightsConfig {
    pub weights: BTreeMap<String, f64>,
}

impl ManualWeightsConfig {
    pub fn new<I, S>(weights: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            weights: weights
                .into_iter()
                .map(|(name, w)| (name.into(), w))
                .collect(),
        }
    }

    /// Parses `Price=0.45,Rating=0.35,Time_Minutes=0.2`.
    pub fn parse(raw: &str) -> Result<Self, WeightingError> {
        let mut weights = BTreeMap::new();
        for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, value) = part.split_once('=').ok_or_else(|| {
                WeightingError::Config(format!("manual weight `{part}` is not NAME=VALUE"))
            })?;
            let name = name.trim();
            if name.is_empty() {
                return Err(WeightingError::Config(format!(
                    "manual weight `{part}` has an empty criterion name"
                )));
            }
            let value = value.trim().parse::<f64>().map_err(|_| {
                WeightingError::Config(format!("manual weight for `{name}` is not a number"))
            })?;
            if weights.insert(name.to_string(), value).is_some() {
                return Err(WeightingError::Config(format!(
                    "manual weight for `{name}` given twice"
                )));
            }
        }
        Ok(Self { weights })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "weights")]
pub enum WeightingConfig {
    #[default]
    Critic,
    Equal,
    Manual(ManualWeightsConfig),
}
