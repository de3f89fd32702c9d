//! `harness-upgrade` command lines

use super::{MigrationKind, MigrationValues};
use shlex::try_join;
use std::fmt;
use std::path::Path;

/// Default name of the external migration CLI
pub const DEFAULT_PROGRAM: &str = "harness-upgrade";

const REDACTED: &str = "****";

/// A program and its arguments, executed without a shell
///
/// The `Display` form is shell quoted and masks the value of `--api-key`, so
/// logged commands can be pasted into a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl MigrationCommand {
    /// The full command migrating one kind for the application described by `values`
    pub fn new(program: impl Into<String>, values: &MigrationValues, kind: MigrationKind) -> Self {
        let flags = [
            ("--api-key", values.api_key.clone()),
            ("--project", values.project.clone()),
            ("--org", values.org.clone()),
            ("--account", values.account.clone()),
            ("--app", values.app.clone()),
            ("--secret-scope", values.secret_scope.to_string()),
            ("--connector-scope", values.connector_scope.to_string()),
            ("--template-scope", values.template_scope.to_string()),
            ("--workflow-scope", values.workflow_scope.to_string()),
            ("--env", values.env.clone()),
        ];

        let mut args = Vec::with_capacity(flags.len() * 2 + 3);
        for (flag, value) in flags {
            args.push(flag.to_string());
            args.push(value);
        }
        args.extend(kind.subcommand().iter().map(|s| s.to_string()));

        Self {
            program: program.into(),
            args,
        }
    }

    /// The equivalent command loading its parameters from a values file
    pub fn rerun(program: impl Into<String>, values_file: &Path, kind: MigrationKind) -> Self {
        let mut args = vec![
            "--load".to_string(),
            values_file.display().to_string(),
        ];
        args.extend(kind.subcommand().iter().map(|s| s.to_string()));

        Self {
            program: program.into(),
            args,
        }
    }
}

impl fmt::Display for MigrationCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words = Vec::with_capacity(self.args.len() + 1);
        words.push(self.program.as_str());
        let mut mask_next = false;
        for arg in &self.args {
            words.push(if mask_next { REDACTED } else { arg.as_str() });
            mask_next = arg == "--api-key";
        }
        let line = try_join(words).map_err(|_| fmt::Error)?;
        write!(f, "{}", line)
    }
}
