//! Structured logging setup.
//!
//! Diagnostics go through `tracing` and are written to stderr, which keeps
//! stdout free for the platform prompt and the result banner.
//!
//! Level selection, highest precedence first:
//!
//! 1. `RUST_LOG` (full `EnvFilter` syntax)
//! 2. `--log-level`
//! 3. `--verbose` (debug) / `--quiet` (error)
//! 4. `NANOBUILD_LOG_LEVEL`
//! 5. `info`

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable consulted when no level flag is given.
pub const LOG_LEVEL_ENV: &str = "NANOBUILD_LOG_LEVEL";

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Include the module target (e.g., nanobuild_sdk::layout) in logs
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            include_target: false,
        }
    }
}

impl LoggingConfig {
    /// Picks the level from CLI flags, falling back to the environment.
    pub fn from_flags(log_level: Option<&str>, verbose: bool, quiet: bool) -> Self {
        let level = if let Some(level_str) = log_level {
            parse_level(level_str)
        } else if verbose {
            Level::DEBUG
        } else if quiet {
            Level::ERROR
        } else {
            let level_str = env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "info".to_string());
            parse_level(&level_str)
        };

        Self {
            level,
            include_target: verbose,
        }
    }
}

/// Parses a log level from a string, defaulting to INFO.
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

/// Installs the stderr subscriber. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(config.level).into())
            .from_env_lossy();

        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(config.include_target)
                    .with_writer(std::io::stderr),
            )
            .init();
    });
}
