use clap::Parser;

use std::path::PathBuf;

use super::constants::{
    ENV_CONFIG, ENV_DEBUG, ENV_HOST, ENV_INGEST_API_KEY, ENV_INGEST_ENABLED, ENV_PORT,
};

#[derive(Parser)]
#[command(name = "fleetwatch")]
#[command(version, about = "Fleet trace ingestion server", long_about = None)]
pub struct Cli {
    /// Server host address
    #[arg(long, short = 'H', env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', env = ENV_PORT)]
    pub port: Option<u16>,

    /// Enable debug mode (writes decoded trace batches to debug folder)
    #[arg(long, env = ENV_DEBUG)]
    pub debug: bool,

    /// Path to config file
    #[arg(long, short = 'c', env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Enable or disable eBPF trace ingestion
    #[arg(long, env = ENV_INGEST_ENABLED)]
    pub ingest_enabled: Option<bool>,

    /// API key required on ingestion requests
    #[arg(long, env = ENV_INGEST_API_KEY, hide_env_values = true)]
    pub ingest_api_key: Option<String>,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub debug: bool,
    pub config: Option<PathBuf>,
    pub ingest_enabled: Option<bool>,
    pub ingest_api_key: Option<String>,
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            debug: cli.debug,
            config: cli.config,
            ingest_enabled: cli.ingest_enabled,
            ingest_api_key: cli.ingest_api_key,
        }
    }
}

/// Parse CLI arguments
pub fn parse() -> CliConfig {
    Cli::parse().into()
}
