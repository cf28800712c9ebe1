use std::net::SocketAddr;

use axum::http::HeaderValue;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_MAX_CONNECTIONS: usize = 10;

#[derive(Clone, Debug, PartialEq)]
pub enum Env {
    Dev,
    Staging,
    Production,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub env: Env,
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub database_max_connections: usize,
    /// Empty when `CORS_ALLOWED_ORIGINS` is not set.
    pub cors_allowed_origins: Vec<HeaderValue>,
}

fn var(key: &str) -> Result<Option<String>, String> {
    match std::env::var(key) {
        Ok(env) => Ok(Some(env)),
        Err(e) => match e {
            std::env::VarError::NotPresent => Ok(None),
            std::env::VarError::NotUnicode(_) => Err(format!(
                "Could not get the environment variable `{key}` due to unicode error"
            )),
        },
    }
}

fn required_var(key: &str) -> String {
    let val = var(key);
    match val {
        Ok(val) => match val {
            Some(val) => val,
            None => {
                tracing::error!("Environment variable `{key}` is required");
                std::process::exit(1)
            }
        },
        Err(e) => {
            tracing::error!(
                "Environment variable `{key}` is required, but could not retrieve: {e}"
            );
            std::process::exit(1)
        }
    }
}

/// Falls back to `default` when the variable is missing or can't be parsed.
fn parsed_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    match var(key) {
        Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value `{raw}` for environment variable `{key}`, using default");
            default
        }),
        Ok(None) => default,
        Err(e) => {
            tracing::warn!("{e}, using default");
            default
        }
    }
}

fn parse_env(raw: Option<&str>) -> Env {
    match raw {
        Some("dev") => Env::Dev,
        Some("staging") => Env::Staging,
        Some("production") => Env::Production,
        _ => Env::Dev,
    }
}

fn parse_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(%error, origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}

impl Env {
    /// Reads `ENVIRONMENT`, defaulting to [`Env::Dev`].
    pub fn from_env() -> Self {
        parse_env(var("ENVIRONMENT").ok().flatten().as_deref())
    }
}

impl ServerConfig {
    pub fn new_from_env() -> Self {
        let env = Env::from_env();

        let cors_allowed_origins = match var("CORS_ALLOWED_ORIGINS") {
            Ok(Some(raw)) => parse_origins(&raw),
            _ => vec![],
        };

        ServerConfig {
            env,
            database_url: required_var("DATABASE_URL"),
            listen_addr: parsed_var("LISTEN_ADDR", SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT))),
            database_max_connections: parsed_var(
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_DATABASE_MAX_CONNECTIONS,
            ),
            cors_allowed_origins,
        }
    }

    #[cfg(test)]
    pub fn local(database_url: impl Into<String>) -> Self {
        ServerConfig {
            env: Env::Dev,
            database_url: database_url.into(),
            listen_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            database_max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
            cors_allowed_origins: vec![],
        }
    }
}
