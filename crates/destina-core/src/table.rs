use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionDirection {
    /// Higher raw values are preferable.
    Benefit,
    /// Lower raw values are preferable.
    Cost,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriterionDirections {
    inner: BTreeMap<String, CriterionDirection>,
}

impl CriterionDirections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, criterion: impl Into<String>, direction: CriterionDirection) -> Self {
        self.insert(criterion, direction);
        self
    }

    pub fn insert(
        &mut self,
        criterion: impl Into<String>,
        direction: CriterionDirection,
    ) -> Option<CriterionDirection> {
        self.inner.insert(criterion.into(), direction)
    }

    pub fn get(&self, criterion: &str) -> Option<CriterionDirection> {
        self.inner.get(criterion).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, CriterionDirection)> {
        self.inner.iter().map(|(name, dir)| (name.as_str(), *dir))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Directions in `table` column order.
    ///
    /// Fails when a direction names a criterion the table lacks, or a table
    /// criterion has no direction.
    pub fn resolve(&self, table: &CriterionTable) -> Result<Vec<CriterionDirection>, EngineError> {
        if let Some(missing) = self
            .inner
            .keys()
            .find(|name| table.criterion_index(name).is_none())
        {
            return Err(EngineError::MissingCriterion(missing.clone()));
        }
        table
            .criteria()
            .iter()
            .map(|c| {
                self.get(c)
                    .ok_or_else(|| EngineError::UndirectedCriterion(c.clone()))
            })
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, CriterionDirection)> for CriterionDirections {
    fn from_iter<I: IntoIterator<Item = (S, CriterionDirection)>>(iter: I) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(name, dir)| (name.into(), dir))
                .collect(),
        }
    }
}

/// Rectangular table of finite criterion values, one row per candidate item.
///
/// Row position is the identity used by the engine; item labels may repeat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionTable {
    criteria: Vec<String>,
    items: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl CriterionTable {
    pub fn new<I, S>(criteria: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for name in criteria {
            let name = name.into();
            if names.contains(&name) {
                return Err(EngineError::DuplicateCriterion(name));
            }
            names.push(name);
        }
        Ok(Self {
            criteria: names,
            items: Vec::new(),
            rows: Vec::new(),
        })
    }

    pub fn from_rows<C, S, R, T>(criteria: C, rows: R) -> Result<Self, EngineError>
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
        R: IntoIterator<Item = (T, Vec<f64>)>,
        T: Into<String>,
    {
        let mut table = Self::new(criteria)?;
        for (item, values) in rows {
            table.push_row(item, values)?;
        }
        Ok(table)
    }

    pub fn with_row(mut self, item: impl Into<String>, values: Vec<f64>) -> Result<Self, EngineError> {
        self.push_row(item, values)?;
        Ok(self)
    }

    pub fn push_row(&mut self, item: impl Into<String>, values: Vec<f64>) -> Result<(), EngineError> {
        let item = item.into();
        if values.len() != self.criteria.len() {
            return Err(EngineError::RowArity {
                item,
                expected: self.criteria.len(),
                actual: values.len(),
            });
        }
        if let Some((criterion, _)) = self
            .criteria
            .iter()
            .zip(&values)
            .find(|(_, v)| !v.is_finite())
        {
            return Err(EngineError::NonNumeric {
                item,
                criterion: criterion.clone(),
            });
        }
        self.items.push(item);
        self.rows.push(values);
        Ok(())
    }

    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn criterion_count(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn criterion_index(&self, criterion: &str) -> Option<usize> {
        self.criteria.iter().position(|c| c == criterion)
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.items
            .iter()
            .map(String::as_str)
            .zip(self.rows.iter().map(Vec::as_slice))
    }

    pub fn column(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().filter_map(move |row| row.get(index).copied())
    }
}
