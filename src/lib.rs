//! Harness application migrator
//!
//! Moves Harness First Gen applications to Next Gen projects: applications are
//! listed over GraphQL, a project is created for each, and the external
//! `harness-upgrade` CLI migrates their content.

pub mod cli;
pub mod client;
pub mod etl;
pub mod harness;
pub mod logging;
pub mod transform;
pub mod upgrade;

// Re-exports for convenience
pub use client::HarnessClient;
pub use etl::{Extractor, Loader, Transformer};
pub use harness::{
    Application, ApplicationsExtractor, IdentifiedApplication, NameFilter, ProjectsLoader,
};
pub use transform::IdentifierAssigner;
pub use upgrade::{MigrationKind, MigrationKinds, MigrationReport, MigrationRunner};
