use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("data shape error: {0}")]
    DataShape(String),

    #[error("criterion `{0}` is not present in the table")]
    MissingCriterion(String),

    #[error("criterion `{0}` has no benefit/cost direction")]
    UndirectedCriterion(String),

    #[error("criterion `{0}` is declared more than once")]
    DuplicateCriterion(String),

    #[error("row `{item}` has {actual} values, expected {expected}")]
    RowArity {
        item: String,
        expected: usize,
        actual: usize,
    },

    #[error("row `{item}` has a non-finite value for `{criterion}`")]
    NonNumeric { item: String, criterion: String },

    #[error("weight for `{criterion}` must be finite and non-negative, got {value}")]
    InvalidWeight { criterion: String, value: f64 },

    #[error("strategy weight must lie in [0, 1], got {0}")]
    InvalidStrategyWeight(f64),
}
