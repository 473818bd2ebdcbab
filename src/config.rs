use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.flickr.com/services/rest/";
pub const DEFAULT_PER_PAGE: u32 = 20;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_key: String,
    /// Account whose photos and albums the gallery shows.
    #[serde(default)]
    pub user_id: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            user_id: user_id.into(),
            base_url: default_base_url(),
            per_page: default_per_page(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Reads an optional file, format picked from its extension, then
    /// overlays `FLICKR_*` environment variables (`FLICKR_API_KEY`, ...).
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        let cfg = builder
            .add_source(::config::Environment::with_prefix("FLICKR"))
            .build()?;

        let cfg: Self = cfg.try_deserialize()?;

        if cfg.api_key.trim().is_empty() {
            return Err(::config::ConfigError::Message("api_key is empty".to_owned()).into());
        }

        tracing::debug!(
            base_url = %cfg.base_url,
            per_page = cfg.per_page,
            "loaded client config"
        );

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serial_test::serial;

    use super::*;

    fn clear_env() {
        for key in ["FLICKR_API_KEY", "FLICKR_USER_ID", "FLICKR_BASE_URL", "FLICKR_PER_PAGE"] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn load_from_toml_with_defaults() {
        clear_env();

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "api_key = \"k3y\"\nuser_id = \"123@N05\"").unwrap();

        let cfg = ClientConfig::load(Some(file.path())).unwrap();

        assert_eq!(cfg.api_key, "k3y");
        assert_eq!(cfg.user_id, "123@N05");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    #[serial]
    fn empty_api_key_is_an_error() {
        clear_env();

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "api_key = \"\"\nper_page = 50").unwrap();

        let err = ClientConfig::load(Some(file.path())).unwrap_err();

        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    #[serial]
    fn load_from_env_only() {
        clear_env();
        std::env::set_var("FLICKR_API_KEY", "envkey");
        std::env::set_var("FLICKR_PER_PAGE", "7");

        let cfg = ClientConfig::load(None);
        clear_env();

        let cfg = cfg.unwrap();

        assert_eq!(cfg.api_key, "envkey");
        assert_eq!(cfg.per_page, 7);
        assert_eq!(cfg.user_id, "");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        clear_env();

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "api_key = \"filekey\"\nuser_id = \"123@N05\"\nper_page = 50").unwrap();

        std::env::set_var("FLICKR_API_KEY", "envkey");

        let cfg = ClientConfig::load(Some(file.path()));
        clear_env();

        let cfg = cfg.unwrap();

        assert_eq!(cfg.api_key, "envkey");
        assert_eq!(cfg.user_id, "123@N05");
        assert_eq!(cfg.per_page, 50);
    }

    #[test]
    fn builder_overrides() {
        let cfg = ClientConfig::new("k", "u")
            .with_base_url("http://localhost:1234/rest/")
            .with_per_page(5);

        assert_eq!(cfg.base_url, "http://localhost:1234/rest/");
        assert_eq!(cfg.per_page, 5);
    }
}
