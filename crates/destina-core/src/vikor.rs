use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineError;
use crate::normalize::{min_max, normalize, NormalizedTable, EPSILON};
use crate::table::{CriterionDirection, CriterionDirections, CriterionTable};
use crate::weights::WeightVector;

/// Axis position assigned to every item when an axis has no spread.
pub const ZERO_SPREAD_POSITION: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VikorConfig {
    /// `v`: weight of group utility against individual regret.
    pub strategy_weight: f64,
}

impl Default for VikorConfig {
    fn default() -> Self {
        Self {
            strategy_weight: 0.5,
        }
    }
}

impl VikorConfig {
    pub fn new(strategy_weight: f64) -> Self {
        Self { strategy_weight }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if (0.0..=1.0).contains(&self.strategy_weight) {
            Ok(())
        } else {
            Err(EngineError::InvalidStrategyWeight(self.strategy_weight))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferencePoint {
    pub criterion: String,
    pub direction: CriterionDirection,
    pub ideal: f64,
    pub anti_ideal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedItem {
    /// 1-based; rank 1 is the best compromise.
    pub rank: usize,
    /// Position of the item in the input table.
    pub row: usize,
    pub item: String,
    /// `S`: weighted sum of distances to the ideal.
    pub group_utility: f64,
    /// `R`: largest single weighted distance to the ideal.
    pub individual_regret: f64,
    /// `Q`: lower is better.
    pub compromise: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingStatus {
    Ranked,
    /// Fewer than two rows; the ordering carries no comparison.
    InsufficientData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingResult {
    entries: Vec<RankedItem>,
    reference: Vec<ReferencePoint>,
    status: RankingStatus,
}

impl RankingResult {
    fn empty() -> Self {
        Self {
            entries: Vec::new(),
            reference: Vec::new(),
            status: RankingStatus::InsufficientData,
        }
    }

    pub fn entries(&self) -> &[RankedItem] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedItem> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn status(&self) -> RankingStatus {
        self.status
    }

    pub fn is_conclusive(&self) -> bool {
        self.status == RankingStatus::Ranked
    }

    pub fn reference_points(&self) -> &[ReferencePoint] {
        &self.reference
    }

    pub fn best(&self) -> Option<&RankedItem> {
        self.entries.first()
    }

    pub fn at_rank(&self, rank: usize) -> Option<&RankedItem> {
        rank.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Rank of the item that sat at `row` in the input table.
    pub fn position_of(&self, row: usize) -> Option<usize> {
        self.entries.iter().find(|e| e.row == row).map(|e| e.rank)
    }

    pub fn item_order(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.item.as_str()).collect()
    }

    pub fn row_order(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.row).collect()
    }
}

/// Ranks the rows of `table` by VIKOR compromise score, ascending.
///
/// Weights and directions are validated against the table before any
/// numeric work. A table criterion without a weight is weighted 0.
pub fn rank(
    table: &CriterionTable,
    weights: &WeightVector,
    directions: &CriterionDirections,
    config: &VikorConfig,
) -> Result<RankingResult, EngineError> {
    config.validate()?;
    let column_weights = resolve_weights(table, weights)?;
    let column_directions = directions.resolve(table)?;

    if table.is_empty() {
        debug!("no rows to rank");
        return Ok(RankingResult::empty());
    }

    let normalized = normalize(table)?;
    let reference = reference_points(&normalized, &column_directions);
    let (utility, regret) = distances(&normalized, &column_weights, &reference);

    let v = config.strategy_weight;
    let utility_pos = axis_positions(&utility, "group_utility");
    let regret_pos = axis_positions(&regret, "individual_regret");

    let mut entries = table
        .items()
        .iter()
        .zip(utility.iter().zip(&regret))
        .zip(utility_pos.iter().zip(&regret_pos))
        .enumerate()
        .map(|(row, ((item, (s, r)), (ps, pr)))| RankedItem {
            rank: 0,
            row,
            item: item.clone(),
            group_utility: *s,
            individual_regret: *r,
            compromise: v * ps + (1.0 - v) * pr,
        })
        .collect::<Vec<_>>();

    entries.sort_by(|a, b| a.compromise.total_cmp(&b.compromise));
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
    }

    let status = if entries.len() < 2 {
        RankingStatus::InsufficientData
    } else {
        RankingStatus::Ranked
    };

    Ok(RankingResult {
        entries,
        reference,
        status,
    })
}

fn resolve_weights(table: &CriterionTable, weights: &WeightVector) -> Result<Vec<f64>, EngineError> {
    let mut seen = BTreeSet::new();
    for (criterion, weight) in weights.iter() {
        if table.criterion_index(criterion).is_none() {
            return Err(EngineError::MissingCriterion(criterion.to_string()));
        }
        if !seen.insert(criterion) {
            return Err(EngineError::DuplicateCriterion(criterion.to_string()));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(EngineError::InvalidWeight {
                criterion: criterion.to_string(),
                value: weight,
            });
        }
    }
    Ok(table
        .criteria()
        .iter()
        .map(|c| weights.get(c).unwrap_or(0.0))
        .collect())
}

fn reference_points(
    normalized: &NormalizedTable,
    directions: &[CriterionDirection],
) -> Vec<ReferencePoint> {
    normalized
        .criteria()
        .iter()
        .zip(normalized.columns())
        .zip(directions)
        .map(|((criterion, column), direction)| {
            let (min, max) = min_max(column);
            let (ideal, anti_ideal) = match direction {
                CriterionDirection::Benefit => (max, min),
                CriterionDirection::Cost => (min, max),
            };
            ReferencePoint {
                criterion: criterion.clone(),
                direction: *direction,
                ideal,
                anti_ideal,
            }
        })
        .collect()
}

/// Per-row `S` (sum) and `R` (max) of `w_j * |ideal_j - n_ij|`.
fn distances(
    normalized: &NormalizedTable,
    weights: &[f64],
    reference: &[ReferencePoint],
) -> (Vec<f64>, Vec<f64>) {
    let rows = normalized.row_count();
    let mut utility = vec![0.0; rows];
    let mut regret = vec![0.0_f64; rows];

    for (column, (weight, point)) in normalized.columns().iter().zip(weights.iter().zip(reference)) {
        for ((s, r), value) in utility.iter_mut().zip(regret.iter_mut()).zip(column) {
            let d = weight * (point.ideal - value).abs();
            *s += d;
            *r = r.max(d);
        }
    }
    (utility, regret)
}

/// `(x - min) / (max - min + EPSILON)`, or [`ZERO_SPREAD_POSITION`] for every
/// item when `max == min` exactly.
#[allow(clippy::float_cmp)]
fn axis_positions(values: &[f64], axis: &'static str) -> Vec<f64> {
    let (best, worst) = min_max(values);
    if worst == best {
        debug!(axis, value = best, "zero spread, every item sits at the midpoint");
        return vec![ZERO_SPREAD_POSITION; values.len()];
    }
    let spread = worst - best;
    values.iter().map(|x| (x - best) / (spread + EPSILON)).collect()
}
