//! Report module - summarizing and exporting trend analyses

pub mod export;
pub mod summary;

pub use export::*;
pub use summary::*;
