use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level Easel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EaselConfig {
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Settings for outbound polling fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent sent as the header baseline; plugin header lines may
    /// override it.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout for one polling call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

// ── Defaults ──────────────────────────────────────────────────

fn default_user_agent() -> String {
    "easel/0.1".into()
}

fn default_timeout_secs() -> u64 {
    10
}

// ── Impls ─────────────────────────────────────────────────────

impl Default for EaselConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EaselConfig {
    /// Load configuration from YAML file + env overrides.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config: EaselConfig = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("EASEL_").split("_"))
            .extract()?;
        Ok(config)
    }
}
