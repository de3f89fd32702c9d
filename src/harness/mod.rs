//! Harness API implementations
//!
//! Each API has its own submodule with its model and ETL operation:
//! - [`applications`]: First Gen applications (GraphQL, extract)
//! - [`projects`]: Next Gen projects (REST, load)

pub mod applications;
pub mod projects;

pub use applications::{Application, ApplicationsExtractor, IdentifiedApplication, NameFilter};
pub use projects::ProjectsLoader;
