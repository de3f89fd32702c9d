use clap::{Parser, builder::styling};
use eyre::Result;
use harness_app_migrator::{
    cli::{MigrateOptions, migrate},
    client::DEFAULT_HARNESS_URL,
    harness::NameFilter,
    logging,
    upgrade::{DEFAULT_PROGRAM, MigrationKinds, Scope, Scopes},
};
use std::path::PathBuf;
use url::Url;

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Migrate all Harness First Gen applications to Next Gen projects with harness-upgrade
#[derive(Parser)]
#[command(name = "harness-migrate", version, styles = STYLES)]
struct Cli {
    /// Harness account identifier
    #[arg(short, long)]
    account_id: String,

    /// Harness First Gen API token, from
    /// https://app.harness.io/#/account/ACCOUNT_ID/access-management/api-keys
    #[arg(short, long, env = "HARNESS_FG_TOKEN", hide_env_values = true)]
    token: String,

    /// Harness Next Gen API token (service account token)
    #[arg(short, long, env = "HARNESS_NG_TOKEN", hide_env_values = true)]
    ng_token: String,

    /// Enable debug log level
    #[arg(short, long)]
    debug: bool,

    /// Next Gen organization identifier
    #[arg(short, long, default_value = "default")]
    organization: String,

    /// Comma separated list of application names to migrate
    #[arg(short, long, default_value = "")]
    filter: String,

    /// Migrate every application except the ones in --filter
    #[arg(short, long)]
    reverse_filter: bool,

    /// Secret scope for all applications
    #[arg(short, long, value_enum, default_value_t = Scope::Account)]
    secret_scope: Scope,

    /// Connector scope for all applications
    #[arg(short, long, value_enum, default_value_t = Scope::Account)]
    connector_scope: Scope,

    /// Template scope for all applications
    #[arg(short = 'T', long, value_enum, default_value_t = Scope::Account)]
    template_scope: Scope,

    /// Workflow scope for all applications
    #[arg(short, long, value_enum, default_value_t = Scope::Project)]
    workflow_scope: Scope,

    /// Target environment for Harness Next Gen
    #[arg(short, long, default_value = "Prod")]
    environment: String,

    /// Disable applications migration
    #[arg(short = 'N', long)]
    no_applications: bool,

    /// Enable pipelines migration
    #[arg(short, long)]
    pipelines: bool,

    /// Enable workflows migration
    #[arg(short = 'W', long)]
    workflows: bool,

    /// Enable workflows migration as pipelines
    #[arg(long)]
    workflows_as_pipelines: bool,

    /// Harness base URL
    #[arg(long, default_value = DEFAULT_HARNESS_URL)]
    harness_url: Url,

    /// Directory to write the values-{project}.yaml files to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// File to append logs to
    #[arg(long, default_value = logging::DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// harness-upgrade binary to run
    #[arg(long, default_value = DEFAULT_PROGRAM)]
    upgrade_bin: String,

    /// Write values files and log commands without creating projects or running harness-upgrade
    #[arg(long)]
    dry_run: bool,
}

impl From<Cli> for MigrateOptions {
    fn from(cli: Cli) -> Self {
        Self {
            harness_url: cli.harness_url,
            account: cli.account_id,
            fg_token: cli.token,
            ng_token: cli.ng_token,
            org: cli.organization,
            filter: NameFilter::parse(&cli.filter, cli.reverse_filter),
            scopes: Scopes {
                secret: cli.secret_scope,
                connector: cli.connector_scope,
                template: cli.template_scope,
                workflow: cli.workflow_scope,
            },
            environment: cli.environment,
            kinds: MigrationKinds {
                applications: !cli.no_applications,
                pipelines: cli.pipelines,
                workflows: cli.workflows,
                workflows_as_pipelines: cli.workflows_as_pipelines,
            },
            output_dir: cli.output_dir,
            program: cli.upgrade_bin,
            dry_run: cli.dry_run,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Tokens may come from a .env file in the working directory
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        return Err(e.into());
    }

    let cli = Cli::parse();
    logging::init(cli.debug, &cli.log_file)?;

    log::info!("Harness First Gen to Next Gen migration");

    let options = MigrateOptions::from(cli);
    let report = migrate(&options).await?;

    log::info!(
        "{} applications processed, {} migration step(s) failed",
        report.applications,
        report.steps_failed()
    );

    Ok(())
}
