use std::{env, str::FromStr, time::Duration};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_STORE_URL: &str = "sqlite://inventory.db?mode=rwc";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    Remote,
    Local,
}

impl FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" | "http" => Ok(BackendKind::Remote),
            "local" | "mock" => Ok(BackendKind::Local),
            other => anyhow::bail!("unknown INVENTORY_BACKEND {other:?}, expected remote or local"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: BackendKind,
    pub api_base_url: String,
    pub store_url: String,
    pub mock_latency: Duration,
    pub http_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            store_url: DEFAULT_STORE_URL.to_string(),
            mock_latency: Duration::from_millis(700),
            http_timeout: Duration::from_secs(30),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        let backend = match env::var("INVENTORY_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.backend,
        };
        let api_base_url = env::var("API_BASE_URL").unwrap_or(defaults.api_base_url);
        let store_url = env::var("LOCAL_STORE_URL").unwrap_or(defaults.store_url);
        let mock_latency = env::var("MOCK_LATENCY_MS")
            .ok()
            .and_then(|ms| ms.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.mock_latency);
        let http_timeout = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.http_timeout);
        Ok(Self {
            backend,
            api_base_url,
            store_url,
            mock_latency,
            http_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_kind_parses_aliases() {
        assert_eq!("Remote".parse::<BackendKind>().unwrap(), BackendKind::Remote);
        assert_eq!("mock".parse::<BackendKind>().unwrap(), BackendKind::Local);
        assert!("ftp".parse::<BackendKind>().is_err());
    }
}
