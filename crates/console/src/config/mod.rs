use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/console.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend base URL, including the `/api` prefix.
    pub base_url: String,
    /// Pre-shared key sent in `X-API-Key` on write requests.
    pub api_key: String,
    /// Row limit of the movements report.
    pub movements_limit: u32,
    /// How long a notification stays on screen.
    pub toast_seconds: u64,
    pub export_dir: PathBuf,
    /// Logging is disabled unless a file is configured (stdout belongs to the TUI).
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000/api".to_string(),
            api_key: "dev-key-12345".to_string(),
            movements_limit: 50,
            toast_seconds: 3,
            export_dir: PathBuf::from("exports"),
            log_file: None,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "inventory_console", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:5000/api).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the API key used for write operations.
    #[arg(long, env = "INVENTORY_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Override the movements report limit.
    #[arg(long)]
    movements_limit: Option<u32>,
    /// Override the CSV export directory.
    #[arg(long)]
    export_dir: Option<PathBuf>,
    /// Write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("INVENTORY_CONSOLE"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(api_key) = args.api_key {
        settings.api_key = api_key;
    }
    if let Some(limit) = args.movements_limit {
        settings.movements_limit = limit;
    }
    if let Some(export_dir) = args.export_dir {
        settings.export_dir = export_dir;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = Some(log_file);
    }

    Ok(settings)
}
