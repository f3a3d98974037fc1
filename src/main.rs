use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use token_sealer::config::loader::load_settings;
use token_sealer::utils::logging::{init_logging, resolve_logging, LogLevel};
use token_sealer::{HttpSealingClient, TokenGenerator};
use tracing::info;

/// Issue one sealed authentication token and print it
#[derive(Debug, Parser)]
#[command(name = "token-sealer", version, about)]
struct Args {
    /// Path to the YAML settings file
    #[arg(short, long, env = "TOKEN_SEALER_CONFIG", default_value = "settings.yaml")]
    config: PathBuf,

    /// Override the configured log level
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load YAML settings
    let settings = load_settings(&args.config)?;
    init_logging(&resolve_logging(settings.logging.as_ref(), args.log_level));

    // 2. Build the generator against the HTTP sealing service
    let generator_settings = settings.generator.into_settings()?;
    let sealing = HttpSealingClient::new(&settings.sealing.endpoint, &generator_settings.region);
    let auth_context = settings
        .context
        .into_auth_context(generator_settings.token_version);
    let generator = TokenGenerator::new(generator_settings, auth_context, sealing)?;

    // 3. Issue and print one sealed token
    info!("issuing sealed token for principal '{}'", generator.principal());
    let encrypted = generator.get_encrypted_token().await?;
    println!("{}", encrypted);
    Ok(())
}
