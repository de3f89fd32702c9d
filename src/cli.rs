//! CLI helper functions
//!
//! Wires the stages together: list applications, identify them, create their
//! projects, then run `harness-upgrade` for each of them.

use crate::{
    client::HarnessClient,
    etl::{Extractor, Loader},
    harness::{ApplicationsExtractor, NameFilter, ProjectsLoader},
    transform::IdentifierAssigner,
    upgrade::{
        CommandExecutor, DryRunExecutor, MigrationKinds, MigrationReport, MigrationRunner,
        ProcessExecutor, Scopes, UpgradeSettings,
    },
};
use eyre::{Context, Result};
use std::path::PathBuf;
use url::Url;

/// Everything a migration run needs, resolved from the command line
#[derive(Clone)]
pub struct MigrateOptions {
    pub harness_url: Url,
    pub account: String,
    /// First Gen API key, used to list applications
    pub fg_token: String,
    /// Next Gen API key, used to create projects and by `harness-upgrade`
    pub ng_token: String,
    pub org: String,
    pub filter: NameFilter,
    pub scopes: Scopes,
    pub environment: String,
    pub kinds: MigrationKinds,
    pub output_dir: PathBuf,
    pub program: String,
    /// Skip project creation and log commands instead of running them
    pub dry_run: bool,
}

impl MigrateOptions {
    fn upgrade_settings(&self) -> UpgradeSettings {
        UpgradeSettings {
            api_key: self.ng_token.clone(),
            account: self.account.clone(),
            org: self.org.clone(),
            environment: self.environment.clone(),
            scopes: self.scopes,
        }
    }
}

/// Migrate all matching applications, running `harness-upgrade` for real
/// unless `dry_run` is set
pub async fn migrate(options: &MigrateOptions) -> Result<MigrationReport> {
    if options.dry_run {
        migrate_with(options, DryRunExecutor).await
    } else {
        migrate_with(options, ProcessExecutor).await
    }
}

/// Migrate all matching applications through the given executor
///
/// Pipeline: ApplicationsExtractor → IdentifierAssigner → ProjectsLoader → MigrationRunner
pub async fn migrate_with<E: CommandExecutor>(
    options: &MigrateOptions,
    executor: E,
) -> Result<MigrationReport> {
    log::info!("Listing First Gen applications of account {}", options.account);
    let fg_client = HarnessClient::try_new(options.harness_url.clone(), &options.fg_token)
        .context("Failed to create First Gen client")?;
    let extractor =
        ApplicationsExtractor::new(fg_client, &options.account, options.filter.clone());
    let applications = extractor.extract().await?;

    if applications.is_empty() {
        log::warn!("No applications to migrate");
        return Ok(MigrationReport::default());
    }

    let targets = IdentifierAssigner.assign_all(applications);
    if targets.is_empty() {
        log::warn!("No application has a usable project identifier, nothing to migrate");
        return Ok(MigrationReport::default());
    }

    if options.dry_run {
        log::info!("Dry run, skipping creation of {} project(s)", targets.len());
    } else {
        let ng_client = HarnessClient::try_new(options.harness_url.clone(), &options.ng_token)
            .context("Failed to create Next Gen client")?;
        ProjectsLoader::new(ng_client, &options.account, &options.org)
            .load(&targets)
            .await?;
    }

    std::fs::create_dir_all(&options.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            options.output_dir.display()
        )
    })?;

    let runner = MigrationRunner::new(executor, options.upgrade_settings(), options.kinds)
        .with_output_dir(&options.output_dir)
        .with_program(&options.program);
    let report = runner.run(&targets).await?;

    if report.is_success() {
        log::info!("✓ Migration finished: {}", report);
    } else {
        log::warn!("Migration finished with failures: {}", report);
        for (identifier, kind) in &report.failures {
            log::warn!("  {} failed for project {}", kind.label(), identifier);
        }
    }

    Ok(report)
}
