//! Harness API client.
//!
//! This module provides the [`HarnessClient`] used for both the First Gen
//! GraphQL gateway and the Next Gen REST API.

mod harness;

pub use harness::{DEFAULT_HARNESS_URL, HarnessClient};
