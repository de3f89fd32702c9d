//! First Gen applications
//!
//! Applications are listed through the GraphQL gateway in pages of
//! [`PAGE_SIZE`] and optionally narrowed down by name.

mod extractor;
mod filter;
mod model;

pub use extractor::{ApplicationsExtractor, PAGE_SIZE};
pub use filter::NameFilter;
pub use model::{Application, IdentifiedApplication};
