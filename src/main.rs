//! cfn-changeset CLI entrypoint.
//!
//! This is the main entrypoint for the cfn-changeset command-line tool.

use std::process::ExitCode;

use cfn_changeset::changeset::{ChangeSetClient, ChangeSetReference, ChangeSetRequest};
use cfn_changeset::cli::{ChangeSetAction, Cli, Commands, LogFormat, OutputFormatter};
use cfn_changeset::config::{AwsSettings, SettingsLoader};
use cfn_changeset::error::Result;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    // A .env in the working directory can supply any flag's env value.
    let dotenv = match SettingsLoader::new().load_dotenv() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.log_format);
    match dotenv {
        Some(path) => info!("Loaded environment from: {}", path.display()),
        None => debug!("No .env file found in the working directory"),
    }

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
///
/// `RUST_LOG` takes precedence over the verbosity flag.
fn init_logging(verbose: bool, format: LogFormat) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    if let Some(path) = &cli.env_file {
        let loaded = SettingsLoader::load_env_file(path)?;
        info!("Loaded environment from: {}", loaded.display());
    }

    let settings = resolve_settings(&cli)?;
    debug!("Using settings: {settings:?}");

    let formatter = OutputFormatter::new(cli.output);
    let client = ChangeSetClient::from_settings(&settings).await?;

    match cli.command {
        Commands::Create(args) => {
            let request = ChangeSetRequest::from(args);
            let handle = client.create(&request).await?;
            println!("{}", formatter.format_handle(&handle));
        }
        Commands::Execute(args) => {
            let reference = ChangeSetReference::from(args);
            client.execute(&reference).await?;
            println!(
                "{}",
                formatter.format_action(&reference, ChangeSetAction::Executed)
            );
        }
        Commands::Delete(args) => {
            let reference = ChangeSetReference::from(args);
            client.delete(&reference).await?;
            println!(
                "{}",
                formatter.format_action(&reference, ChangeSetAction::Deleted)
            );
        }
    }

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Resolves credentials and region from flags, then the environment.
///
/// Flags already fall back to the primary variables through clap; this also
/// picks up values from an `--env-file` loaded after parsing.
fn resolve_settings(cli: &Cli) -> Result<AwsSettings> {
    AwsSettings::resolve(
        cli.access_key_id.as_deref(),
        cli.secret_access_key.as_deref(),
        cli.region.as_deref(),
    )
}
