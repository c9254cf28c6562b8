use std::net::SocketAddr;

use anyhow::{Context, Result};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://todos.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_vars(std::env::var("DATABASE_URL").ok(), std::env::var("BIND_ADDR").ok())
    }

    fn from_vars(database_url: Option<String>, bind_addr: Option<String>) -> Result<Self> {
        let database_url = database_url.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let bind_addr = bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        let bind_addr = bind_addr.parse::<SocketAddr>().with_context(|| format!("invalid BIND_ADDR {bind_addr:?}"))?;
        Ok(Self { database_url, bind_addr })
    }
}

/// Creates the database file (and its parent directory) for file-backed sqlite URLs.
pub fn prepare_sqlite_file(database_url: &str) -> Result<()> {
    if database_url.contains(":memory:") { return Ok(()); }
    if let Some(path) = database_url.strip_prefix("sqlite://") {
        // On Windows, absolute paths may look like /C:/path; strip the leading slash
        let path = if cfg!(windows) && path.len() >= 3 && path.as_bytes()[0] == b'/' && path.as_bytes()[2] == b':' {
            &path[1..]
        } else {
            path
        };
        let path = path.split('?').next().unwrap_or(path);
        use std::{fs, fs::OpenOptions, path::Path};
        let p = Path::new(path);
        if let Some(parent) = p.parent() { if !parent.as_os_str().is_empty() { fs::create_dir_all(parent)?; } }
        if !p.exists() {
            OpenOptions::new().create(true).append(true).open(p).with_context(|| format!("creating {}", p.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_vars(None, None).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn explicit_values_win() {
        let config = AppConfig::from_vars(Some("sqlite::memory:".into()), Some("0.0.0.0:8080".into())).unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn bad_bind_addr_is_an_error() {
        let err = AppConfig::from_vars(None, Some("not-an-addr".into())).unwrap_err();
        assert!(err.to_string().contains("BIND_ADDR"));
    }

    #[test]
    fn memory_urls_need_no_file() {
        prepare_sqlite_file("sqlite::memory:").unwrap();
    }
}
