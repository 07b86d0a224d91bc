//! Server settings, read once at startup from `PERSONALITY_*` environment
//! variables. Unset variables take the defaults below; unparsable ones are
//! logged and also fall back to the default.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use log::warn;

/// URL prefix stored uploads are served under.
pub const PUBLIC_UPLOADS_PATH: &str = "/uploads";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory uploads are written to.
    pub upload_dir: PathBuf,
    /// Multipart field holding the file.
    pub upload_field: String,
    pub max_upload_bytes: usize,
    /// Open the default browser on the app once the server is up.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            upload_dir: PathBuf::from("uploads"),
            upload_field: common::model::config::DEFAULT_FIELD.to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
            open_browser: true,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: lookup("PERSONALITY_HOST").unwrap_or(defaults.host),
            port: parsed(&lookup, "PERSONALITY_PORT", defaults.port),
            upload_dir: lookup("PERSONALITY_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            upload_field: lookup("PERSONALITY_UPLOAD_FIELD").unwrap_or(defaults.upload_field),
            max_upload_bytes: parsed(&lookup, "PERSONALITY_MAX_UPLOAD_BYTES", defaults.max_upload_bytes),
            open_browser: parsed(&lookup, "PERSONALITY_OPEN_BROWSER", defaults.open_browser),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parsed<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using {:?}", key, raw, default);
            default
        }),
        None => default,
    }
}
