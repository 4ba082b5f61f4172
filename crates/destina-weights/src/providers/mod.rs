pub mod critic;
pub mod equal;
pub mod manual;

pub use critic::CriticWeighting;
pub use equal::EqualWeighting;
pub use manual::ManualWeighting;
