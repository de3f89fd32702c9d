//! Core ETL (Extract, Transform, Load) abstractions
//!
//! Applications are extracted from the First Gen API, transformed into
//! identified Next Gen targets, and loaded as Next Gen projects.

mod extract;
mod load;
mod transform;

pub use extract::Extractor;
pub use load::Loader;
pub use transform::Transformer;
