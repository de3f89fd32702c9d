//! Next Gen projects
//!
//! One project is created per identified application through
//! `POST /ng/api/projects`.

mod loader;

pub use loader::{MODULES, ProjectsLoader, random_color};
