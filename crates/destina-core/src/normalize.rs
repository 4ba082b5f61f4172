use serde::Serialize;
use tracing::debug;

use crate::error::EngineError;
use crate::table::CriterionTable;

/// Guard added to every min-max denominator.
pub const EPSILON: f64 = 1e-9;

/// Column-major min-max rescaling of a [`CriterionTable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTable {
    criteria: Vec<String>,
    columns: Vec<Vec<f64>>,
    row_count: usize,
}

impl NormalizedTable {
    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&[f64]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    pub fn value(&self, row: usize, column: usize) -> Option<f64> {
        self.columns.get(column)?.get(row).copied()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn criterion_count(&self) -> usize {
        self.criteria.len()
    }
}

/// Rescales every column to `[0, 1]` with `(x - min) / (max - min + EPSILON)`.
///
/// A column without spread is mapped to all zeros, which later drives its
/// CRITIC weight to zero.
pub fn normalize(table: &CriterionTable) -> Result<NormalizedTable, EngineError> {
    if table.row_count() == 0 {
        return Err(EngineError::DataShape("table has no rows".to_string()));
    }
    if table.criterion_count() == 0 {
        return Err(EngineError::DataShape(
            "table declares no criteria".to_string(),
        ));
    }

    let columns = table
        .criteria()
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let values = table.column(index).collect::<Vec<_>>();
            normalize_column(name, &values)
        })
        .collect();

    Ok(NormalizedTable {
        criteria: table.criteria().to_vec(),
        columns,
        row_count: table.row_count(),
    })
}

#[allow(clippy::float_cmp)]
fn normalize_column(name: &str, values: &[f64]) -> Vec<f64> {
    let (min, max) = min_max(values);
    let range = max - min;
    if range == 0.0 {
        debug!(criterion = name, "zero-range column normalized to 0");
        return vec![0.0; values.len()];
    }
    if range.is_finite() {
        return values.iter().map(|x| (x - min) / (range + EPSILON)).collect();
    }
    // `max - min` overflowed; the same ratio computed at half scale stays finite.
    let half_range = max / 2.0 - min / 2.0;
    values
        .iter()
        .map(|x| (x / 2.0 - min / 2.0) / (half_range + EPSILON / 2.0))
        .collect()
}

pub(crate) fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CriterionTable {
        CriterionTable::from_rows(
            ["Price", "Rating"],
            [
                ("a", vec![10_000.0, 4.5]),
                ("b", vec![30_000.0, 4.5]),
                ("c", vec![20_000.0, 4.5]),
            ],
        )
        .expect("table")
    }

    #[test]
    fn rescales_into_unit_range() {
        let out = normalize(&table()).expect("normalize");
        let price = out.column(0).expect("price column");
        assert!((price[0] - 0.0).abs() < 1e-12);
        assert!((price[1] - 1.0).abs() < 1e-6);
        assert!(price[1] < 1.0);
        assert!((price[2] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn span_wider_than_f64_max_stays_finite() {
        let table = CriterionTable::from_rows(
            ["Price"],
            [("a", vec![-1e308]), ("b", vec![1e308]), ("c", vec![0.0])],
        )
        .expect("table");
        let out = normalize(&table).expect("normalize");
        let price = out.column(0).expect("price column");
        assert!(price.iter().all(|v| v.is_finite()));
        assert!(price[0].abs() < 1e-12);
        assert!((price[1] - 1.0).abs() < 1e-6);
        assert!((price[2] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn constant_column_is_exactly_zero() {
        let out = normalize(&table()).expect("normalize");
        assert_eq!(out.column(1), Some(&[0.0, 0.0, 0.0][..]));
    }

    #[test]
    fn empty_shapes_are_rejected() {
        let no_rows = CriterionTable::new(["Price"]).expect("table");
        assert!(matches!(
            normalize(&no_rows),
            Err(EngineError::DataShape(_))
        ));

        let no_criteria = CriterionTable::new(Vec::<String>::new())
            .and_then(|t| t.with_row("a", vec![]))
            .expect("table");
        assert!(matches!(
            normalize(&no_criteria),
            Err(EngineError::DataShape(_))
        ));
    }

    #[test]
    fn input_table_is_untouched() {
        let input = table();
        let before = input.clone();
        let _ = normalize(&input).expect("normalize");
        assert_eq!(input, before);
    }
}
