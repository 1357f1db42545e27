//! Configuration for the library client

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variables selecting the backend origin, in priority order
pub const API_BASE_ENV_VARS: [&str; 2] = ["VITE_API_BASE_URL", "VITE_API_BASE"];

/// Origin used when no base URL is configured anywhere
pub const FALLBACK_API_BASE: &str = "http://localhost:8081";

/// Prefix for configuration overrides taken from the environment
pub const ENV_PREFIX: &str = "GEN_LIBRARY_";

/// Library client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend origin; empty means "use the environment or the fallback"
    #[serde(default)]
    pub api_base_url: String,

    /// Total time allowed for a single request
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Time allowed to establish a connection
    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,

    /// File backing persisted client preferences
    #[serde(default = "default_preferences_path")]
    pub preferences_path: PathBuf,

    /// Development server settings
    #[serde(default)]
    pub dev_server: DevServerConfig,
}

/// Development server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Backend origin that proxied requests are forwarded to
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Path prefixes forwarded to the backend
    #[serde(default = "default_proxy_prefixes")]
    pub proxy_prefixes: Vec<String>,

    /// Built frontend assets to serve for everything else
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
            preferences_path: default_preferences_path(),
            dev_server: DevServerConfig::default(),
        }
    }
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            backend_url: default_backend_url(),
            proxy_prefixes: default_proxy_prefixes(),
            static_dir: None,
        }
    }
}

impl Config {
    /// Load configuration: defaults, then the optional YAML file, then
    /// `GEN_LIBRARY_*` environment overrides. The VITE base-URL variables
    /// are applied last.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let mut config: Config = figment.extract()?;
        config.api_base_url =
            resolve_api_base(|name| std::env::var(name).ok(), &config.api_base_url);
        Ok(config)
    }

    /// Base URL the client should talk to
    pub fn effective_api_base(&self) -> &str {
        if self.api_base_url.trim().is_empty() {
            FALLBACK_API_BASE
        } else {
            &self.api_base_url
        }
    }
}

/// Pick the backend origin from the environment, falling back to `configured`.
///
/// Empty variables count as unset.
pub fn resolve_api_base<F>(lookup: F, configured: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    API_BASE_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| configured.trim().to_string())
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_preferences_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gen-library")
        .join("preferences.json")
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5174
}

fn default_backend_url() -> String {
    FALLBACK_API_BASE.to_string()
}

fn default_proxy_prefixes() -> Vec<String> {
    vec!["/api".to_string(), "/thumbs".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_base_url_prefers_vite_api_base_url() {
        let lookup = env(&[
            ("VITE_API_BASE_URL", "http://nas:8081"),
            ("VITE_API_BASE", "http://other:9000"),
        ]);
        assert_eq!(resolve_api_base(lookup, "http://cfg"), "http://nas:8081");
    }

    #[test]
    fn test_base_url_falls_through_empty_values() {
        let lookup = env(&[("VITE_API_BASE_URL", ""), ("VITE_API_BASE", "http://other:9000")]);
        assert_eq!(resolve_api_base(lookup, ""), "http://other:9000");
    }

    #[test]
    fn test_base_url_uses_configured_value() {
        assert_eq!(resolve_api_base(env(&[]), " http://cfg:1 "), "http://cfg:1");
        assert_eq!(resolve_api_base(env(&[]), ""), "");
    }

    #[test]
    fn test_effective_base_falls_back_to_localhost() {
        let config = Config::default();
        assert_eq!(config.effective_api_base(), "http://localhost:8081");

        let config = Config {
            api_base_url: "http://nas:8081".to_string(),
            ..Config::default()
        };
        assert_eq!(config.effective_api_base(), "http://nas:8081");
    }

    #[test]
    fn test_dev_server_defaults() {
        let dev = DevServerConfig::default();
        assert_eq!(dev.host, "0.0.0.0");
        assert_eq!(dev.port, 5174);
        assert_eq!(dev.backend_url, "http://localhost:8081");
        assert_eq!(dev.proxy_prefixes, vec!["/api", "/thumbs"]);
        assert!(dev.static_dir.is_none());
    }

    // ===== Layered loading =====

    #[test]
    fn test_load_without_file_uses_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();

            let config = Config::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.api_base_url, "");
            assert_eq!(config.request_timeout, Duration::from_secs(30));
            assert_eq!(config.connect_timeout, Duration::from_secs(5));
            assert_eq!(config.dev_server.port, 5174);
            assert_eq!(config.dev_server.proxy_prefixes, vec!["/api", "/thumbs"]);
            Ok(())
        });
    }

    #[test]
    fn test_yaml_then_env_layering() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                "gen-library.yaml",
                r#"
api_base_url: http://yaml:8081
request_timeout: 2m
preferences_path: prefs.json
dev_server:
  host: 127.0.0.1
  port: 6000
  proxy_prefixes: ["/api"]
  static_dir: dist
"#,
            )?;
            jail.set_env("GEN_LIBRARY_DEV_SERVER__PORT", "7000");
            jail.set_env("GEN_LIBRARY_CONNECT_TIMEOUT", "250ms");

            let config = Config::load(Some(Path::new("gen-library.yaml")))
                .map_err(|e| e.to_string())?;

            assert_eq!(config.api_base_url, "http://yaml:8081");
            assert_eq!(config.request_timeout, Duration::from_secs(120));
            assert_eq!(config.connect_timeout, Duration::from_millis(250));
            assert_eq!(config.preferences_path, PathBuf::from("prefs.json"));
            assert_eq!(config.dev_server.host, "127.0.0.1");
            assert_eq!(config.dev_server.port, 7000);
            assert_eq!(config.dev_server.proxy_prefixes, vec!["/api"]);
            assert_eq!(config.dev_server.static_dir, Some(PathBuf::from("dist")));
            assert_eq!(config.dev_server.backend_url, "http://localhost:8081");
            Ok(())
        });
    }

    #[test]
    fn test_vite_variables_override_loaded_base_url() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file("gen-library.yaml", "api_base_url: http://yaml:8081")?;
            jail.set_env("GEN_LIBRARY_API_BASE_URL", "http://env:8081");
            jail.set_env("VITE_API_BASE_URL", "");
            jail.set_env("VITE_API_BASE", "http://vite:9000");

            let config = Config::load(Some(Path::new("gen-library.yaml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.api_base_url, "http://vite:9000");
            assert_eq!(config.effective_api_base(), "http://vite:9000");
            Ok(())
        });
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();

            let err = Config::load(Some(Path::new("absent.yaml"))).unwrap_err();
            assert!(err.to_string().contains("config file not found"));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_duration_is_an_error() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("GEN_LIBRARY_REQUEST_TIMEOUT", "soon");

            assert!(Config::load(None).is_err());
            Ok(())
        });
    }
}
