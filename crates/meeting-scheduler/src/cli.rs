//! Command-line interface definition using clap.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use scheduler_api::ApiConfig;
use scheduler_persistence::RetryPolicy;
use scheduler_recommend::LookupStrategy;

/// Targets whose level `-v` controls.
const LOG_TARGETS: &[&str] = &[
    "meeting_scheduler",
    "scheduler_api",
    "scheduler_models",
    "scheduler_persistence",
    "scheduler_recommend",
    "tower_http",
];

/// Meeting scheduler - collect availability and pick a time slot
#[derive(Parser, Debug)]
#[command(name = "meeting-scheduler")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Host to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Path to the SQLite database file
    #[arg(short, long, env = "DB_PATH", default_value = "scheduler.db")]
    pub database: PathBuf,

    /// Attempts to open the database before giving up
    #[arg(long, env = "DB_CONNECT_ATTEMPTS", default_value_t = 5)]
    pub db_connect_attempts: u32,

    /// Seconds to wait between database open attempts
    #[arg(long, env = "DB_RETRY_DELAY_SECS", default_value_t = 5)]
    pub db_retry_delay_secs: u64,

    /// Per-request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 15)]
    pub request_timeout_secs: u64,

    /// Allowed CORS origins (comma separated, `*` for any)
    #[arg(
        long = "cors-origin",
        env = "CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "*"
    )]
    pub cors_origins: Vec<String>,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,

    /// How recommendations resolve participants
    #[arg(long, env = "RECOMMENDATION_LOOKUP", default_value = "per-row")]
    pub lookup_strategy: LookupArg,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Command-line form of [`LookupStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LookupArg {
    #[default]
    PerRow,
    Batched,
}

impl From<LookupArg> for LookupStrategy {
    fn from(arg: LookupArg) -> Self {
        match arg {
            LookupArg::PerRow => LookupStrategy::PerRow,
            LookupArg::Batched => LookupStrategy::Batched,
        }
    }
}

impl Cli {
    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    /// Filter directive used when `RUST_LOG` is unset: dependencies stay at
    /// `warn`, workspace crates and the HTTP trace layer follow `-v`.
    pub fn log_filter(&self) -> String {
        let level = self.log_level().to_string().to_lowercase();
        let mut directive = String::from("warn");
        for target in LOG_TARGETS {
            directive.push_str(&format!(",{}={}", target, level));
        }
        directive
    }

    /// Builds the API configuration from the parsed arguments.
    pub fn api_config(&self) -> ApiConfig {
        let cors_origins = self
            .cors_origins
            .iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        ApiConfig::new(self.host.clone(), self.port)
            .with_cors_origins(cors_origins)
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs))
            .with_lookup_strategy(self.lookup_strategy.into())
    }

    /// Returns the database open retry policy.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.db_connect_attempts,
            Duration::from_secs(self.db_retry_delay_secs),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["meeting-scheduler"]);
        assert_eq!(cli.host, "0.0.0.0");
        assert_eq!(cli.port, 8080);
        assert_eq!(cli.database, PathBuf::from("scheduler.db"));
        assert_eq!(cli.log_format, LogFormat::Pretty);
        assert_eq!(cli.lookup_strategy, LookupArg::PerRow);
        assert_eq!(cli.log_level(), tracing::Level::INFO);

        let config = cli.api_config();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert!(config.allows_any_origin());
        assert_eq!(config.request_timeout, Duration::from_secs(15));

        let policy = cli.retry_policy();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.delay, Duration::from_secs(5));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "meeting-scheduler",
            "--host",
            "127.0.0.1",
            "-p",
            "9000",
            "--database",
            "/tmp/sched.db",
            "--cors-origin",
            "http://a.test, http://b.test",
            "--log-format",
            "json",
            "--lookup-strategy",
            "batched",
            "--request-timeout-secs",
            "3",
        ]);

        assert_eq!(cli.log_format, LogFormat::Json);
        let config = cli.api_config();
        assert_eq!(config.bind_address(), "127.0.0.1:9000");
        assert_eq!(
            config.cors_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert_eq!(config.lookup_strategy, LookupStrategy::Batched);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_cli_verbose() {
        let cli = Cli::parse_from(["meeting-scheduler", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_level(), tracing::Level::TRACE);
    }

    #[test]
    fn test_log_filter_scopes_workspace_crates() {
        let cli = Cli::parse_from(["meeting-scheduler", "-v"]);
        let filter = cli.log_filter();

        assert!(filter.starts_with("warn,"));
        assert!(filter.contains("scheduler_api=debug"));
        assert!(filter.contains("scheduler_recommend=debug"));
        assert!(filter.contains("meeting_scheduler=debug"));
        assert!(!filter.contains("rusqlite"));
        assert!(tracing_subscriber::EnvFilter::try_new(&filter).is_ok());
    }

    #[test]
    fn test_retry_policy_clamps_attempts() {
        let cli = Cli::parse_from(["meeting-scheduler", "--db-connect-attempts", "0"]);
        assert_eq!(cli.retry_policy().max_attempts, 1);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }
}
