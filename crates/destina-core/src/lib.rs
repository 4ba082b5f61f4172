//! Weighting-and-ranking engine: min-max normalization, CRITIC criterion
//! weights and VIKOR compromise ranking over a numeric criterion table.

pub mod compromise;
pub mod critic;
pub mod error;
pub mod normalize;
pub mod table;
pub mod vikor;
pub mod weights;

pub use compromise::*;
pub use critic::*;
pub use error::EngineError;
pub use normalize::*;
pub use table::*;
pub use vikor::*;
pub use weights::*;
