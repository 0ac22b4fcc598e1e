//! Command-line interface for nrexport.
//!
//! Runs one export cycle over a JSON record file and writes the resulting
//! batches to stdout.

use crate::application::Application;
use crate::core::config::ConfigBuilder;
use crate::core::{Config, ExporterError, LogLevel, Result};
use crate::export::StdoutSender;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

/// Transform OpenTelemetry aggregations and spans into ingest payloads
#[derive(Parser, Debug)]
#[command(name = "nrexport")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (default: ~/.config/nrexport/config.yaml)
    #[arg(short, long, env = "NREXPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Service name reported as `service.name`
    #[arg(long, env = "NREXPORT_SERVICE_NAME")]
    pub service_name: Option<String>,

    /// JSON record file to export
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, env = "NREXPORT_DEBUG")]
    pub debug: bool,

    /// Validate configuration and exit
    #[arg(long)]
    pub check_config: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Load configuration with proper precedence:
    /// 1. CLI arguments (highest priority)
    /// 2. Config file
    /// 3. Defaults (lowest priority)
    pub async fn load_config(&self) -> Result<Config> {
        let mut builder = ConfigBuilder::new();

        let config_path = if let Some(path) = &self.config {
            path.clone()
        } else {
            let default_path = dirs::config_dir()
                .map(|d| d.join("nrexport").join("config.yaml"))
                .unwrap_or_else(|| PathBuf::from("~/.config/nrexport/config.yaml"));

            if default_path.exists() {
                default_path
            } else {
                return self.build_config_from_args(builder);
            }
        };

        match tokio::fs::read_to_string(&config_path).await {
            Ok(content) => {
                builder = builder.from_yaml(&content)?;
                tracing::info!("Loaded configuration from: {:?}", config_path);
            },
            Err(e) if self.config.is_some() => {
                // User explicitly specified a config file that doesn't exist
                return Err(ExporterError::config(format!(
                    "Failed to read config file {:?}: {}",
                    config_path, e
                )));
            },
            Err(_) => {
                tracing::debug!("No config file found at {:?}, using defaults", config_path);
            },
        }

        self.build_config_from_args(builder)
    }

    fn build_config_from_args(&self, mut builder: ConfigBuilder) -> Result<Config> {
        if let Some(name) = &self.service_name {
            builder = builder.service_name(name.as_str());
        }

        builder.debug(self.debug).build()
    }

    /// Initialize logging.
    ///
    /// `--debug` beats `NREXPORT_LOG_LEVEL`, which beats the configured level.
    /// Logs go to stderr so stdout carries only payloads.
    pub fn init_logging(&self, configured: LogLevel) -> Result<()> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

        let env_log_level = std::env::var("NREXPORT_LOG_LEVEL")
            .unwrap_or_else(|_| configured.as_str().to_string());
        let log_level = if self.debug {
            "debug"
        } else {
            env_log_level.as_str()
        };

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact();

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| ExporterError::config(format!("Failed to initialize logging: {}", e)))?;

        Ok(())
    }
}

/// Execute the nrexport command.
pub async fn execute(cli: Cli) -> Result<()> {
    let config = cli.load_config().await?;

    cli.init_logging(config.logging.level)?;

    if cli.check_config {
        config.validate()?;
        println!("Configuration is valid!");
        println!("  Service name: {}", config.exporter.service_name);
        println!("  Harvest interval: {:?}", config.exporter.harvest_interval);
        println!("  On error: {:?}", config.exporter.on_error);
        println!("  Log level: {}", config.logging.level.as_str());
        return Ok(());
    }

    let Some(input) = &cli.input else {
        return Err(ExporterError::config("--input is required unless --check-config is set"));
    };

    let app = Application::new(config, Arc::new(StdoutSender::new()))?;
    let (metrics, spans) = app.run_file(input).await?;

    tracing::info!(
        metrics = metrics.exported,
        skipped = metrics.skipped,
        spans = spans.exported,
        "Done"
    );

    Ok(())
}
