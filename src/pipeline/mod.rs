//! Pipeline module - binning, trend analysis and orchestration

pub mod binning;
pub mod correlation;
pub mod error;
pub mod loader;
pub mod stats;
pub mod trend;
pub mod univariate;

pub use binning::*;
pub use correlation::*;
pub use error::BinningError;
pub use loader::*;
pub use trend::*;
pub use univariate::*;
