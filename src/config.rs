use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::orders::TransitionPolicy;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub orders: OrdersConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// DashMap store seeded with demo orders; state is lost on restart
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Required for the postgres backend; `DATABASE_URL` overrides
    #[serde(default)]
    pub postgres_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout_ms() -> u64 {
    3000
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            postgres_url: None,
            max_connections: default_max_connections(),
            acquire_timeout_ms: default_acquire_timeout_ms(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OrdersConfig {
    #[serde(default)]
    pub transition_policy: TransitionPolicy,
    /// Upper bound on any single storage call
    #[serde(default = "default_storage_timeout_ms")]
    pub storage_timeout_ms: u64,
}

fn default_storage_timeout_ms() -> u64 {
    5000
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            transition_policy: TransitionPolicy::default(),
            storage_timeout_ms: default_storage_timeout_ms(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret; `JWT_SECRET` overrides
    #[serde(default)]
    pub jwt_secret: String,
}

impl AppConfig {
    /// Load `config/{env}.yaml`, apply environment overrides and validate
    pub fn load(env: &str) -> anyhow::Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;
        let mut config = Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path))?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// `JWT_SECRET` and `DATABASE_URL` take precedence over the file
    pub fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(secret) = var("JWT_SECRET").filter(|s| !s.is_empty()) {
            self.auth.jwt_secret = secret;
        }
        if let Some(url) = var("DATABASE_URL").filter(|s| !s.is_empty()) {
            self.storage.postgres_url = Some(url);
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            bail!("auth.jwt_secret is empty; set it in the config file or via JWT_SECRET");
        }
        if self.storage.backend == StorageBackend::Postgres
            && self.storage.postgres_url.as_deref().is_none_or(str::is_empty)
        {
            bail!("storage.postgres_url is required for the postgres backend (or set DATABASE_URL)");
        }
        if self.storage.max_connections == 0 {
            bail!("storage.max_connections must be at least 1");
        }
        if self.orders.storage_timeout_ms == 0 {
            bail!("orders.storage_timeout_ms must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
log_level: info
log_dir: ./logs
log_file: storefront.log
use_json: false
rotation: daily
gateway:
  host: 127.0.0.1
  port: 8080
auth:
  jwt_secret: from-file
"#;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_yaml_str(MINIMAL).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.orders.transition_policy, TransitionPolicy::Strict);
        assert_eq!(config.orders.storage_timeout_ms, 5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::from_yaml_str(MINIMAL).unwrap();
        config.apply_env_overrides(|key| match key {
            "JWT_SECRET" => Some("from-env".to_string()),
            "DATABASE_URL" => Some("postgresql://localhost/shop".to_string()),
            _ => None,
        });
        assert_eq!(config.auth.jwt_secret, "from-env");
        assert_eq!(
            config.storage.postgres_url.as_deref(),
            Some("postgresql://localhost/shop")
        );

        // Empty values do not clobber the file
        let mut config = AppConfig::from_yaml_str(MINIMAL).unwrap();
        config.apply_env_overrides(|_| Some(String::new()));
        assert_eq!(config.auth.jwt_secret, "from-file");
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        let yaml = MINIMAL.replace("jwt_secret: from-file", "jwt_secret: \"\"");
        let config = AppConfig::from_yaml_str(&yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_postgres_backend_needs_url() {
        let yaml = format!(
            "{MINIMAL}storage:\n  backend: postgres\norders:\n  transition_policy: permissive\n"
        );
        let mut config = AppConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(config.orders.transition_policy, TransitionPolicy::Permissive);
        assert!(config.validate().is_err());

        config.storage.postgres_url = Some("postgresql://localhost/shop".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let yaml = format!("{MINIMAL}orders:\n  transition_policy: anything\n");
        assert!(AppConfig::from_yaml_str(&yaml).is_err());
    }
}
