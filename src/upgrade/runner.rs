//! Migration runner
//!
//! Writes the values file for each application, then runs one
//! `harness-upgrade` command per enabled migration kind.

use super::{
    CommandExecutor, DEFAULT_PROGRAM, MigrationCommand, MigrationKind, MigrationKinds,
    MigrationValues, UpgradeSettings, values_path,
};
use crate::harness::IdentifiedApplication;
use eyre::Result;
use std::fmt;
use std::path::{Path, PathBuf};

/// Outcome of a migration run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Applications processed (values file written, commands attempted)
    pub applications: usize,
    pub steps_succeeded: usize,
    /// Failed steps as (project identifier, kind)
    pub failures: Vec<(String, MigrationKind)>,
}

impl MigrationReport {
    pub fn steps_failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} application(s), {} step(s) succeeded, {} step(s) failed",
            self.applications,
            self.steps_succeeded,
            self.steps_failed()
        )
    }
}

/// Runs `harness-upgrade` for every identified application
///
/// Steps never stop the run: a failed command is logged and recorded in the
/// [`MigrationReport`], and the next step starts. Writing a values file is the
/// only hard failure, since its commands could not be re-run without it.
///
/// # Example
/// ```no_run
/// use harness_app_migrator::upgrade::{
///     MigrationKinds, MigrationRunner, ProcessExecutor, Scopes, UpgradeSettings,
/// };
///
/// # async fn example(targets: Vec<harness_app_migrator::harness::IdentifiedApplication>) -> eyre::Result<()> {
/// let settings = UpgradeSettings {
///     api_key: "ng-token".to_string(),
///     account: "abc123".to_string(),
///     org: "default".to_string(),
///     environment: "Prod".to_string(),
///     scopes: Scopes::default(),
/// };
/// let runner = MigrationRunner::new(ProcessExecutor, settings, MigrationKinds::all())
///     .with_output_dir("values");
/// let report = runner.run(&targets).await?;
/// println!("{}", report);
/// # Ok(())
/// # }
/// ```
pub struct MigrationRunner<E> {
    executor: E,
    settings: UpgradeSettings,
    kinds: MigrationKinds,
    output_dir: PathBuf,
    program: String,
}

impl<E: CommandExecutor> MigrationRunner<E> {
    pub fn new(executor: E, settings: UpgradeSettings, kinds: MigrationKinds) -> Self {
        Self {
            executor,
            settings,
            kinds,
            output_dir: PathBuf::from("."),
            program: DEFAULT_PROGRAM.to_string(),
        }
    }

    /// Directory receiving the values files (default: current directory)
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Name or path of the `harness-upgrade` binary
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run one kind for one application; returns whether it succeeded
    async fn run_step(
        &self,
        target: &IdentifiedApplication,
        values: &MigrationValues,
        values_file: &Path,
        kind: MigrationKind,
    ) -> bool {
        log::info!("You can run this again by executing the following command:");
        log::info!(
            "{}",
            MigrationCommand::rerun(&self.program, values_file, kind)
        );

        let command = MigrationCommand::new(&self.program, values, kind);
        match self.executor.execute(&command).await {
            Ok(output) if output.is_failure() => {
                if output.stderr.trim().is_empty() {
                    log::error!(
                        "Migrating {} for application {} failed",
                        kind.label(),
                        target.name()
                    );
                } else {
                    log::error!("{}", output.stderr.trim_end());
                }
                log::debug!("{}", output.stdout);
                false
            }
            Ok(output) => {
                log::info!(
                    "Application {} has been migrated to Harness NG.",
                    target.name()
                );
                log::debug!("{}", output.stdout);
                true
            }
            Err(e) => {
                log::error!("Command [{}] failed: {:#}", command, e);
                false
            }
        }
    }

    /// Migrate every application with every enabled kind
    ///
    /// # Errors
    /// Returns an error if a values file cannot be written
    pub async fn run(&self, targets: &[IdentifiedApplication]) -> Result<MigrationReport> {
        let kinds = self.kinds.enabled();
        if kinds.is_empty() {
            log::warn!("No migration types enabled, only values files will be written");
        }

        let total = targets.len();
        let mut report = MigrationReport::default();

        for target in targets {
            let values = MigrationValues::new(&self.settings, target);
            let values_file = values_path(&self.output_dir, &target.identifier);
            values.write(&values_file)?;
            log::info!("File created at {}", values_file.display());

            if !kinds.is_empty() {
                log::info!(
                    "Migrating {} for application {}",
                    self.kinds.labels(),
                    target.name()
                );
            }

            for kind in &kinds {
                if self.run_step(target, &values, &values_file, *kind).await {
                    report.steps_succeeded += 1;
                } else {
                    report.failures.push((target.identifier.clone(), *kind));
                }
            }

            report.applications += 1;
            log::info!(
                "{} applications migrated out of {}",
                report.applications,
                total
            );
        }

        Ok(report)
    }
}
