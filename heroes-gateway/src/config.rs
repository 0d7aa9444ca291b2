//! Gateway settings read from the environment.

use std::time::Duration;

use heroes_store::DatabaseConfig;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A numeric variable could not be parsed.
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

/// Runtime configuration of the gateway.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Socket address to bind, e.g. `127.0.0.1:3456`.
    pub listen_addr: String,
    /// PostgreSQL settings; `None` selects the in-memory store.
    pub database: Option<DatabaseConfig>,
    /// Bearer token accepted by the admin guard.
    pub admin_token: Option<String>,
}

impl GatewayConfig {
    pub const DEFAULT_LISTEN_ADDR: &'static str = "127.0.0.1:3456";

    /// Read configuration from process environment variables.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidNumber`] if a pool setting is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidNumber`] if a pool setting is malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let listen_addr = lookup("HEROES_LISTEN_ADDR")
            .unwrap_or_else(|| Self::DEFAULT_LISTEN_ADDR.to_owned());

        let database = match lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            Some(url) => {
                let mut db = DatabaseConfig::new(url);
                if let Some(max) = parse_number(&lookup, "HEROES_DB_MAX_CONNECTIONS")? {
                    db.max_connections = u32::try_from(max).map_err(|_| {
                        ConfigError::InvalidNumber {
                            var: "HEROES_DB_MAX_CONNECTIONS",
                            value: max.to_string(),
                        }
                    })?;
                }
                if let Some(secs) = parse_number(&lookup, "HEROES_DB_ACQUIRE_TIMEOUT_SECS")? {
                    db.acquire_timeout = Duration::from_secs(secs);
                }
                Some(db)
            }
            None => None,
        };

        let admin_token = lookup("HEROES_ADMIN_TOKEN").filter(|t| !t.is_empty());

        Ok(Self { listen_addr, database, admin_token })
    }
}

fn parse_number(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u64>, ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(ConfigError::InvalidNumber { var, value }),
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("listen_addr", &self.listen_addr)
            .field("database", &self.database.as_ref().map(|_| "postgres"))
            .field("admin_token", &self.admin_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
