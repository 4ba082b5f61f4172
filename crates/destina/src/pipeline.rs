use std::sync::Arc;

use destina_core::{
    rank, CriterionDirections, CriterionTable, RankingResult, VikorConfig, WeightVector,
};
use destina_weights::{build_weighting_strategy, WeightingStrategy};
use serde::Serialize;
use tracing::{debug, info, info_span};

use crate::config::PipelineConfig;
use crate::error::PipelineError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutcome {
    pub weights: WeightVector,
    pub ranking: RankingResult,
}

impl PipelineOutcome {
    /// False when there were too few rows to compare.
    pub fn is_conclusive(&self) -> bool {
        self.ranking.is_conclusive()
    }
}

/// Weighs a table with the configured strategy, then ranks it with VIKOR.
///
/// Holds no per-request state; one pipeline can serve concurrent callers.
#[derive(Clone)]
pub struct RankingPipeline {
    weighting: Arc<dyn WeightingStrategy>,
    vikor: VikorConfig,
}

impl RankingPipeline {
    pub fn new(
        weighting: Arc<dyn WeightingStrategy>,
        vikor: VikorConfig,
    ) -> Result<Self, PipelineError> {
        vikor.validate()?;
        Ok(Self { weighting, vikor })
    }

    pub fn from_config(cfg: PipelineConfig) -> Result<Self, PipelineError> {
        let weighting = build_weighting_strategy(cfg.weighting)?;
        Self::new(weighting, cfg.vikor)
    }

    pub fn from_env() -> Result<Self, PipelineError> {
        Self::from_config(PipelineConfig::from_env()?)
    }

    pub fn weighting_name(&self) -> &'static str {
        self.weighting.name()
    }

    pub fn vikor(&self) -> &VikorConfig {
        &self.vikor
    }

    pub fn run(
        &self,
        table: &CriterionTable,
        directions: &CriterionDirections,
    ) -> Result<PipelineOutcome, PipelineError> {
        let span = info_span!(
            "ranking_pipeline",
            rows = table.row_count(),
            criteria = table.criterion_count(),
            weighting = self.weighting.name(),
        );
        let _guard = span.enter();

        // Surface direction mismatches before any numeric work.
        directions.resolve(table)?;

        let weights = self.weighting.weigh(table)?;
        debug!(basis = ?weights.basis(), "criterion weights derived");

        let ranking = rank(table, &weights, directions, &self.vikor)?;
        info!(
            ranked = ranking.len(),
            status = ?ranking.status(),
            best = ranking.best().map(|e| e.item.as_str()),
            "ranking complete"
        );

        Ok(PipelineOutcome { weights, ranking })
    }

    /// Ranks with caller-supplied weights, bypassing the configured strategy.
    pub fn run_with_weights(
        &self,
        table: &CriterionTable,
        weights: &WeightVector,
        directions: &CriterionDirections,
    ) -> Result<RankingResult, PipelineError> {
        Ok(rank(table, weights, directions, &self.vikor)?)
    }
}
