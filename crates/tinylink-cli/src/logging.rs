use crate::cli::Environment;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber for the given deployment environment.
///
/// Local runs get human-readable output at DEBUG; dev and prod emit JSON,
/// at DEBUG and INFO respectively. `RUST_LOG` overrides the default level.
pub fn init(env: Environment) {
    match env {
        Environment::Local => tracing_subscriber::fmt()
            .with_env_filter(default_filter(Level::DEBUG))
            .init(),
        Environment::Dev => tracing_subscriber::fmt()
            .json()
            .with_env_filter(default_filter(Level::DEBUG))
            .init(),
        Environment::Prod => tracing_subscriber::fmt()
            .json()
            .with_env_filter(default_filter(Level::INFO))
            .init(),
    }
}

fn default_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()))
}
