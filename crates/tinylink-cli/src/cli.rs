use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};

pub const ENV_ENV: &str = "TINYLINK_ENV";
pub const STORAGE_BACKEND_ENV: &str = "TINYLINK_STORAGE_BACKEND";
pub const DB_HOST_ENV: &str = "TINYLINK_DB_HOST";
pub const DB_PORT_ENV: &str = "TINYLINK_DB_PORT";
pub const DB_USER_ENV: &str = "TINYLINK_DB_USER";
pub const DB_PASSWORD_ENV: &str = "TINYLINK_DB_PASSWORD";
pub const DB_NAME_ENV: &str = "TINYLINK_DB_NAME";

/// Deployment environment, used only to pick the logging setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    #[value(name = "local")]
    Local,
    #[value(name = "dev")]
    Dev,
    #[value(name = "prod")]
    Prod,
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "local"),
            Environment::Dev => write!(f, "dev"),
            Environment::Prod => write!(f, "prod"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "postgres")]
    Postgres,
    #[value(name = "in-memory")]
    InMemory,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::Postgres => write!(f, "postgres"),
            StorageBackendArg::InMemory => write!(f, "in-memory"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tinylink")]
pub struct Cli {
    /// Destination URL to persist.
    pub url: String,

    /// Short alias the URL will be known by.
    pub alias: String,

    #[arg(long, env = ENV_ENV, value_enum, default_value_t = Environment::Local)]
    pub env: Environment,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Postgres
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = DB_HOST_ENV, required_if_eq("storage", "postgres"))]
    pub db_host: Option<String>,

    #[arg(long, env = DB_PORT_ENV, required_if_eq("storage", "postgres"))]
    pub db_port: Option<u16>,

    #[arg(long, env = DB_USER_ENV, required_if_eq("storage", "postgres"))]
    pub db_user: Option<String>,

    #[arg(long, env = DB_PASSWORD_ENV, required_if_eq("storage", "postgres"))]
    pub db_password: Option<String>,

    #[arg(long, env = DB_NAME_ENV, required_if_eq("storage", "postgres"))]
    pub db_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postgres_backend_requires_database_flags() {
        let result = Cli::try_parse_from(["tinylink", "https://google.com", "google"]);
        assert!(result.is_err());
    }

    #[test]
    fn in_memory_backend_needs_no_database_flags() {
        let cli = Cli::try_parse_from([
            "tinylink",
            "https://google.com",
            "google",
            "--storage",
            "in-memory",
        ])
        .unwrap();

        assert_eq!(cli.storage, StorageBackendArg::InMemory);
        assert_eq!(cli.env, Environment::Local);
        assert_eq!(cli.url, "https://google.com");
        assert_eq!(cli.alias, "google");
    }

    #[test]
    fn all_database_flags_parse() {
        let cli = Cli::try_parse_from([
            "tinylink",
            "https://google.com",
            "google",
            "--env",
            "prod",
            "--db-host",
            "db.internal",
            "--db-port",
            "5432",
            "--db-user",
            "tinylink",
            "--db-password",
            "secret",
            "--db-name",
            "urls",
        ])
        .unwrap();

        assert_eq!(cli.env, Environment::Prod);
        assert_eq!(cli.db_host.as_deref(), Some("db.internal"));
        assert_eq!(cli.db_port, Some(5432));
        assert_eq!(cli.db_name.as_deref(), Some("urls"));
    }
}
