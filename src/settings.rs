use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    pub registry: Registry,
    pub policy: PolicyDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    /// Base URL of the registry daemon the API client talks to.
    pub url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyDefaults {
    /// Prefix for generated policy names: `<prefix>-<effect>-<timestamp>`.
    pub name_prefix: String,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:4370".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for PolicyDefaults {
    fn default() -> Self {
        Self {
            name_prefix: "generated".to_string(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("registry.url", Registry::default().url)
            .into_diagnostic()?
            .set_default("registry.timeout_secs", Registry::default().timeout_secs)
            .into_diagnostic()?
            .set_default("policy.name_prefix", PolicyDefaults::default().name_prefix)
            .into_diagnostic()?;

        // Optional file
        if Path::new(path).exists() {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment overrides: CORDON__REGISTRY__URL=..., etc.
        builder = builder.add_source(config::Environment::with_prefix("CORDON").separator("__"));

        let cfg = builder.build().into_diagnostic()?;
        let s: Settings = cfg.try_deserialize().into_diagnostic()?;
        Ok(s)
    }

    /// The registry base URL without a trailing slash.
    pub fn registry_url(&self) -> String {
        self.registry.url.trim_end_matches('/').to_string()
    }
}
