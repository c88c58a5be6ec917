use clap::{Parser, ValueEnum};
use quotevault_telemetry::{LogFormat, TelemetryConfig};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "QUOTEVAULT_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "QUOTEVAULT_STORAGE_BACKEND";
pub const DATABASE_URL_ENV: &str = "QUOTEVAULT_DATABASE_URL";
pub const MAX_CONNECTIONS_ENV: &str = "QUOTEVAULT_MAX_CONNECTIONS";
pub const CORS_ORIGIN_ENV: &str = "QUOTEVAULT_CORS_ORIGIN";
pub const LOG_FORMAT_ENV: &str = "QUOTEVAULT_LOG_FORMAT";
pub const LOG_FILTER_ENV: &str = "RUST_LOG";
pub const OTLP_ENDPOINT_ENV: &str = "QUOTEVAULT_OTLP_ENDPOINT";
pub const SHUTDOWN_TIMEOUT_ENV: &str = "QUOTEVAULT_SHUTDOWN_TIMEOUT_SECS";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_CORS_ORIGIN: &str = "*";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "sqlite")]
    Sqlite,
    #[value(name = "postgres")]
    Postgres,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Sqlite => write!(f, "sqlite"),
            StorageBackendArg::Postgres => write!(f, "postgres"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "quotevault", about = "Quote Vault HTTP server")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(
        long,
        env = DATABASE_URL_ENV,
        required_if_eq_any([("storage", "sqlite"), ("storage", "postgres")])
    )]
    pub database_url: Option<String>,

    #[arg(long, env = MAX_CONNECTIONS_ENV, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    #[arg(long, env = CORS_ORIGIN_ENV, default_value = DEFAULT_CORS_ORIGIN)]
    pub cors_origin: String,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,

    #[arg(long, env = LOG_FILTER_ENV, default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,

    #[arg(long, env = OTLP_ENDPOINT_ENV)]
    pub otlp_endpoint: Option<String>,

    #[arg(
        long = "shutdown-timeout",
        env = SHUTDOWN_TIMEOUT_ENV,
        default_value_t = DEFAULT_SHUTDOWN_TIMEOUT_SECS
    )]
    pub shutdown_timeout_secs: u64,
}

impl CLI {
    pub fn telemetry(&self) -> TelemetryConfig {
        TelemetryConfig::builder()
            .filter(self.log_filter.clone())
            .format(self.log_format.into())
            .otlp_endpoint(self.otlp_endpoint.clone())
            .build()
    }
}
