//! `harness-upgrade` integration
//!
//! The actual record migration is done by the external `harness-upgrade` CLI.
//! This module writes the per-application values files it can load, builds its
//! command lines, and runs them one after another through a [`CommandExecutor`].

mod command;
mod executor;
mod kinds;
mod runner;
mod values;

pub use command::{DEFAULT_PROGRAM, MigrationCommand};
pub use executor::{CommandExecutor, CommandOutput, DryRunExecutor, ProcessExecutor};
pub use kinds::{MigrationKind, MigrationKinds};
pub use runner::{MigrationReport, MigrationRunner};
pub use values::{MigrationValues, Scope, Scopes, UpgradeSettings, values_path};
