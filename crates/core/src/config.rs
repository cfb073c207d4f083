use std::{path::PathBuf, time::Duration};

pub const API_URL_ENV: &str = "VIDEOINSIGHT_API_URL";
pub const TIMEOUT_ENV: &str = "VIDEOINSIGHT_TIMEOUT_SECS";
pub const DOWNLOAD_DIR_ENV: &str = "VIDEOINSIGHT_DOWNLOAD_DIR";

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Backend connection settings, resolved once at startup.
///
/// `api_base` is the single source for every request URL and every
/// download link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub connect_timeout: Duration,
    /// Analyses run the whole download/transcribe/generate pipeline
    /// server-side, so this is generous.
    pub request_timeout: Duration,
    pub download_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(900),
            download_dir: default_download_dir(),
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let mut config = Self {
            request_timeout: std::env::var(TIMEOUT_ENV)
                .ok()
                .and_then(|s| s.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            download_dir: std::env::var(DOWNLOAD_DIR_ENV)
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.download_dir),
            ..defaults
        };
        if let Ok(base) = std::env::var(API_URL_ENV) {
            config = config.with_api_base(&base);
        }
        config
    }

    /// Overrides the base URL. Blank input keeps the current value.
    pub fn with_api_base(mut self, base: &str) -> Self {
        let base = base.trim().trim_end_matches('/');
        if !base.is_empty() {
            self.api_base = base.to_string();
        }
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Joins a server path (`/history`, `/download/...`) onto the base.
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.api_base, path)
        } else {
            format!("{}/{}", self.api_base, path)
        }
    }
}

fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("videoinsight")
}
