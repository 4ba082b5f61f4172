use serde::Serialize;
use tracing::debug;

use crate::normalize::normalize;
use crate::table::CriterionTable;
use crate::weights::{FallbackReason, WeightBasis, WeightVector};

/// Intermediate CRITIC statistics over the normalized table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticReport {
    pub criteria: Vec<String>,
    pub std_devs: Vec<f64>,
    pub correlations: Vec<Vec<f64>>,
    pub information: Vec<f64>,
}

impl CriticReport {
    pub fn total_information(&self) -> f64 {
        self.information.iter().sum()
    }

    pub fn weights(&self) -> WeightVector {
        let total = self.total_information();
        if !total.is_finite() || total <= 0.0 {
            debug!(total, "criteria carry no information, using uniform weights");
            return WeightVector::uniform(
                self.criteria.iter().cloned(),
                WeightBasis::Uniform(FallbackReason::NoInformation),
            );
        }
        WeightVector::from_pairs(
            self.criteria
                .iter()
                .cloned()
                .zip(self.information.iter().map(|c| c / total)),
            WeightBasis::Critic,
        )
    }
}

/// Correlations this close to ±1 are treated as exact.
const CORRELATION_SNAP: f64 = 1e-10;

#[derive(Debug, Clone, Copy)]
struct ColumnStats {
    mean: f64,
    std_dev: f64,
}

impl ColumnStats {
    fn of(values: &[f64]) -> Self {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let squares = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        let std_dev = if values.len() < 2 {
            0.0
        } else {
            (squares / (n - 1.0)).sqrt()
        };
        Self { mean, std_dev }
    }
}

/// Sample Pearson correlation; zero-variance columns correlate 0 with everything.
fn pearson(a: &[f64], sa: ColumnStats, b: &[f64], sb: ColumnStats) -> f64 {
    if sa.std_dev <= 0.0 || sb.std_dev <= 0.0 || a.len() < 2 {
        return 0.0;
    }
    let cov = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - sa.mean) * (y - sb.mean))
        .sum::<f64>()
        / (a.len() as f64 - 1.0);
    let r = cov / (sa.std_dev * sb.std_dev);
    if !r.is_finite() {
        0.0
    } else if r >= 1.0 - CORRELATION_SNAP {
        1.0
    } else if r <= -1.0 + CORRELATION_SNAP {
        -1.0
    } else {
        r
    }
}

/// Computes CRITIC statistics, or `None` when the table has fewer than two
/// rows or no criteria.
pub fn critic_report(table: &CriterionTable) -> Option<CriticReport> {
    if table.row_count() <= 1 || table.criterion_count() == 0 {
        return None;
    }
    let normalized = match normalize(table) {
        Ok(normalized) => normalized,
        Err(err) => {
            debug!(%err, "table cannot be normalized, no CRITIC statistics");
            return None;
        }
    };
    let columns = normalized.columns();
    let stats = columns
        .iter()
        .map(|c| ColumnStats::of(c))
        .collect::<Vec<_>>();

    let correlations = columns
        .iter()
        .zip(&stats)
        .map(|(cj, sj)| {
            columns
                .iter()
                .zip(&stats)
                .map(|(ck, sk)| pearson(cj, *sj, ck, *sk))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let information = stats
        .iter()
        .zip(&correlations)
        .map(|(s, row)| s.std_dev * row.iter().map(|r| 1.0 - r).sum::<f64>())
        .collect();

    Some(CriticReport {
        criteria: normalized.criteria().to_vec(),
        std_devs: stats.iter().map(|s| s.std_dev).collect(),
        correlations,
        information,
    })
}

/// Objective criterion weights via CRITIC.
///
/// Never fails: tables that cannot be discriminated degrade to `1/k`
/// weights tagged with [`WeightBasis::Uniform`].
pub fn critic_weights(table: &CriterionTable) -> WeightVector {
    if let Some(report) = critic_report(table) {
        return report.weights();
    }
    let reason = if table.criterion_count() == 0 {
        FallbackReason::NoCriteria
    } else {
        FallbackReason::InsufficientRows
    };
    debug!(
        rows = table.row_count(),
        criteria = table.criterion_count(),
        ?reason,
        "not enough data for CRITIC, using uniform weights"
    );
    WeightVector::uniform(table.criteria().iter().cloned(), WeightBasis::Uniform(reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-6, "{a} != {b}");
    }

    #[test]
    fn constant_criterion_gets_zero_weight() {
        let table = CriterionTable::from_rows(
            ["Price", "Rating"],
            [("A", vec![100_000.0, 4.5]), ("B", vec![50_000.0, 4.5])],
        )
        .expect("table");

        let w = critic_weights(&table);
        assert_eq!(w.basis(), WeightBasis::Critic);
        assert_close(w.get("Price").unwrap_or_default(), 1.0);
        assert_close(w.get("Rating").unwrap_or_default(), 0.0);
    }

    #[test]
    fn single_row_falls_back_to_uniform() {
        let table = CriterionTable::from_rows(
            ["Price", "Rating", "Time_Minutes"],
            [("only", vec![15_000.0, 4.4, 60.0])],
        )
        .expect("table");

        let w = critic_weights(&table);
        assert_eq!(
            w.basis(),
            WeightBasis::Uniform(FallbackReason::InsufficientRows)
        );
        for (_, weight) in w.iter() {
            assert_close(weight, 1.0 / 3.0);
        }
        assert!(critic_report(&table).is_none());
    }

    #[test]
    fn perfectly_correlated_columns_fall_back() {
        let table = CriterionTable::from_rows(
            ["x", "y"],
            [
                ("a", vec![1.0, 10.0]),
                ("b", vec![2.0, 20.0]),
                ("c", vec![3.0, 30.0]),
            ],
        )
        .expect("table");

        let w = critic_weights(&table);
        assert_eq!(w.basis(), WeightBasis::Uniform(FallbackReason::NoInformation));
        assert_close(w.get("x").unwrap_or_default(), 0.5);
    }

    #[test]
    fn all_constant_columns_fall_back() {
        let table = CriterionTable::from_rows(
            ["x", "y"],
            [("a", vec![1.0, 2.0]), ("b", vec![1.0, 2.0])],
        )
        .expect("table");

        let w = critic_weights(&table);
        assert_eq!(w.basis(), WeightBasis::Uniform(FallbackReason::NoInformation));
    }

    #[test]
    fn no_criteria_yields_empty_vector() {
        let table = CriterionTable::new(Vec::<String>::new())
            .and_then(|t| t.with_row("a", vec![]))
            .and_then(|t| t.with_row("b", vec![]))
            .expect("table");

        let w = critic_weights(&table);
        assert!(w.is_empty());
        assert_eq!(w.basis(), WeightBasis::Uniform(FallbackReason::NoCriteria));
    }

    #[test]
    fn report_is_absent_for_unnormalizable_tables() {
        let no_rows = CriterionTable::new(["Price", "Rating"]).expect("table");
        assert!(critic_report(&no_rows).is_none());

        let no_criteria = CriterionTable::new(Vec::<String>::new())
            .and_then(|t| t.with_row("a", vec![]))
            .and_then(|t| t.with_row("b", vec![]))
            .expect("table");
        assert!(critic_report(&no_criteria).is_none());
    }

    #[test]
    fn report_matches_hand_computation() {
        // x = [0, 0.5, 1], y = [1, 0, 0.5] after normalization.
        let table = CriterionTable::from_rows(
            ["x", "y"],
            [
                ("a", vec![0.0, 2.0]),
                ("b", vec![1.0, 0.0]),
                ("c", vec![2.0, 1.0]),
            ],
        )
        .expect("table");

        let report = critic_report(&table).expect("report");
        assert_close(report.std_devs[0], 0.5);
        assert_close(report.std_devs[1], 0.5);
        assert_close(report.correlations[0][0], 1.0);
        assert_close(report.correlations[0][1], -0.5);
        assert_close(report.information[0], 0.5 * 1.5);

        let w = report.weights();
        assert_close(w.get("x").unwrap_or_default(), 0.5);
        assert_close(w.total(), 1.0);
    }

    #[test]
    fn uncorrelated_variable_criterion_dominates() {
        let table = CriterionTable::from_rows(
            ["Price", "Rating", "Time_Minutes"],
            [
                ("a", vec![10.0, 4.0, 30.0]),
                ("b", vec![20.0, 4.1, 90.0]),
                ("c", vec![30.0, 4.2, 60.0]),
                ("d", vec![40.0, 4.3, 120.0]),
            ],
        )
        .expect("table");

        let w = critic_weights(&table);
        let price = w.get("Price").unwrap_or_default();
        let rating = w.get("Rating").unwrap_or_default();
        let time = w.get("Time_Minutes").unwrap_or_default();
        assert!(time > price);
        assert_close(price, rating);
        assert_close(w.total(), 1.0);
    }
}
