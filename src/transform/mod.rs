//! Transform implementations for Harness applications

mod identifier;

pub use identifier::{IdentifierAssigner, sanitize_identifier};
