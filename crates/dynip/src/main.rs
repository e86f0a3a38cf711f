// # dynip - Route 53 dynamic IP updater
//
// Thin integration layer: read environment, initialize logging, load the two
// configuration documents, build the IP source and provider, run one pass.
// All update logic lives in dynip-core.
//
// Run it periodically from a systemd timer or cron; it exits after one pass.
//
// ## Configuration
//
// ### Environment
// - `DYNIP_CONFIG_DIR`: Directory holding the JSON documents (default: `./.config`)
// - `DYNIP_IP_SOURCE_URL`: Echo service URL (default: `https://api.ipify.org`)
// - `DYNIP_LOG_LEVEL`: trace, debug, info, warn, error (default: debug)
//
// ### Files (inside `DYNIP_CONFIG_DIR`)
// - `aws_config.json`: Session parameters (`aws_access_key_id`, `aws_secret_access_key`,
//   `aws_session_token`, `region_name`, `profile_name`)
// - `hosted_zone_config.json`: Target zone and record set
//
// ## Example
//
// ```bash
// mkdir -p .config
// echo '{"profile_name": "dns-admin"}' > .config/aws_config.json
// echo '{"target_hosted_zone_name": "example.com.",
//        "target_record_set_name": "home.example.com."}' > .config/hosted_zone_config.json
//
// dynip
// ```

use anyhow::{Context, Result};
use dynip_core::config::{ConfigPaths, load_record_descriptor, load_session_parameters};
use dynip_core::DdnsEngine;
use dynip_ip_http::{DEFAULT_ECHO_URL, HttpIpSource};
use dynip_provider_route53::Route53Provider;
use std::env;
use std::process::ExitCode;
use tracing::{Level, debug, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Record set updated
/// - 1: Configuration or startup error
/// - 2: Update pass failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DdnsExitCode {
    /// Pass completed
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error during the pass
    RuntimeError = 2,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
#[derive(Debug)]
struct Config {
    config_dir: String,
    ip_source_url: String,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Self {
        Self {
            config_dir: env::var("DYNIP_CONFIG_DIR")
                .unwrap_or_else(|_| dynip_core::config::DEFAULT_CONFIG_DIR.to_string()),
            ip_source_url: env::var("DYNIP_IP_SOURCE_URL")
                .unwrap_or_else(|_| DEFAULT_ECHO_URL.to_string()),
            log_level: env::var("DYNIP_LOG_LEVEL").unwrap_or_else(|_| "debug".to_string()),
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.config_dir.is_empty() {
            anyhow::bail!("DYNIP_CONFIG_DIR cannot be empty");
        }

        if !self.ip_source_url.starts_with("https://") && !self.ip_source_url.starts_with("http://")
        {
            anyhow::bail!(
                "DYNIP_IP_SOURCE_URL must use HTTP or HTTPS scheme. Got: {}",
                self.ip_source_url
            );
        }

        self.level()?;
        Ok(())
    }

    /// Configured level, or `debug` when it cannot be parsed
    fn level_or_default(&self) -> Level {
        self.level().unwrap_or(Level::DEBUG)
    }

    fn level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "DYNIP_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }
    }
}

fn main() -> ExitCode {
    let config = Config::from_env();

    // Initialize tracing first so every diagnostic goes to stdout
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.level_or_default())
        .with_writer(std::io::stdout)
        .with_file(true)
        .with_line_number(true)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        println!("Failed to set tracing subscriber: {}", e);
        return DdnsExitCode::ConfigError.into();
    }

    if let Err(code) = check_config(&config) {
        return code.into();
    }

    info!("Running...");

    // One pass, strictly sequential
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::RuntimeError.into();
        }
    };

    rt.block_on(run(config)).into()
}

/// Validate the environment, logging the failure on the installed subscriber
fn check_config(config: &Config) -> std::result::Result<(), DdnsExitCode> {
    config.validate().map_err(|e| {
        error!("Configuration validation error: {:#}", e);
        DdnsExitCode::ConfigError
    })
}

/// Build the engine and run one update pass
async fn run(config: Config) -> DdnsExitCode {
    let engine = match build_engine(&config).await {
        Ok(engine) => engine,
        Err(e) => {
            error!("Unhandled error: {:#}", e);
            return DdnsExitCode::ConfigError;
        }
    };

    match engine.run_once().await.context("Update pass failed") {
        Ok(report) => {
            info!(
                "{} {} {} -> {} in {}",
                if report.created() { "Created" } else { "Updated" },
                report.applied.record_type,
                report.applied.name,
                report.applied.value,
                report.zone.name
            );
            DdnsExitCode::Success
        }
        Err(e) => {
            error!("Unhandled error: {:#}", e);
            DdnsExitCode::RuntimeError
        }
    }
}

/// Load both configuration documents and wire up the components
async fn build_engine(config: &Config) -> Result<DdnsEngine> {
    let paths = ConfigPaths::new(&config.config_dir);
    debug!("Reading configuration from {}", paths.dir().display());

    let descriptor = load_record_descriptor(paths.record_config())
        .context("Failed to load record descriptor")?;
    let session = load_session_parameters(paths.session_config())
        .context("Failed to load session parameters")?;

    info!(
        "Target: {} {} (ttl: {}) in zone {}",
        descriptor.target_record_set_type,
        descriptor.target_record_set_name,
        descriptor.target_record_set_ttl,
        descriptor.target_hosted_zone_name
    );

    let provider = Route53Provider::from_session(&session)
        .await
        .context("Failed to create Route 53 session")?;
    let ip_source = HttpIpSource::new(config.ip_source_url.clone());

    let engine = DdnsEngine::new(Box::new(ip_source), Box::new(provider), descriptor)?;
    Ok(engine)
}
