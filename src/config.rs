use crate::keymap::Keymap;
use crate::styles::ThemeType;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the barbershop API (default: http://localhost:8080)
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// UI theme: "dark", "light" or "nocolor"
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Key bindings (preset plus overrides)
    #[serde(default)]
    pub keymap: Keymap,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_theme() -> String {
    "dark".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
            theme: default_theme(),
            keymap: Keymap::default(),
        }
    }
}

impl Config {
    /// Load configuration from file or create it with defaults.
    /// Environment overrides are applied on top but never written back.
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let mut config: Config =
                toml::from_str(&content).with_context(|| "Failed to parse config file")?;
            if config.api_url.trim().is_empty() {
                config.api_url = default_api_url();
            }
            if config.request_timeout_secs == 0 {
                config.request_timeout_secs = default_request_timeout();
            }
            config
        } else {
            info!("No config at {:?}, writing defaults", config_path);
            let config = Self::default();
            config.save(config_path)?;
            config
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// `BARBERSHOP_API_URL` replaces the API URL; `NO_COLOR` forces the plain theme.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("BARBERSHOP_API_URL") {
            if !url.trim().is_empty() {
                self.api_url = url.trim().to_string();
            }
        }
        if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            self.theme = "nocolor".to_string();
        }
    }

    /// Save configuration to file with owner-only permissions
    pub fn save(&self, config_path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        // 600: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(config_path)
                .with_context(|| format!("Failed to get file metadata: {:?}", config_path))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(config_path, perms)
                .with_context(|| format!("Failed to set file permissions: {:?}", config_path))?;
        }

        Ok(())
    }

    pub fn theme_type(&self) -> ThemeType {
        self.theme.parse().unwrap_or_default()
    }
}
