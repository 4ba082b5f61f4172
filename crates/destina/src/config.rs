use destina_core::VikorConfig;
use destina_weights::{ManualWeightsConfig, WeightingConfig};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

pub const ENV_WEIGHTING: &str = "DESTINA_WEIGHTING";
pub const ENV_MANUAL_WEIGHTS: &str = "DESTINA_MANUAL_WEIGHTS";
pub const ENV_STRATEGY_WEIGHT: &str = "DESTINA_STRATEGY_WEIGHT";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub weighting: WeightingConfig,
    pub vikor: VikorConfig,
}

impl PipelineConfig {
    pub fn from_env() -> Result<Self, PipelineError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads `DESTINA_*` settings through `lookup`; unset keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PipelineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let weighting = lookup(ENV_WEIGHTING)
            .map(|v| v.trim().to_ascii_lowercase())
            .filter(|v| !v.is_empty());

        let weighting = match weighting.as_deref() {
            None | Some("critic") => WeightingConfig::Critic,
            Some("equal" | "uniform") => WeightingConfig::Equal,
            Some("manual") => {
                let raw = lookup(ENV_MANUAL_WEIGHTS).ok_or_else(|| {
                    PipelineError::Config(format!(
                        "{ENV_MANUAL_WEIGHTS} must be set when {ENV_WEIGHTING}=manual"
                    ))
                })?;
                WeightingConfig::Manual(ManualWeightsConfig::parse(&raw)?)
            }
            Some(other) => {
                return Err(PipelineError::Config(format!(
                    "unsupported weighting `{other}`. Use critic, equal, or manual."
                )))
            }
        };

        let default_v = VikorConfig::default().strategy_weight;
        let strategy_weight = lookup(ENV_STRATEGY_WEIGHT)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(default_v)
            .clamp(0.0, 1.0);

        Ok(Self {
            weighting,
            vikor: VikorConfig::new(strategy_weight),
        })
    }
}
