//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `BINDERY_*` environment variables, `__` between sections
//!    (`BINDERY_VERIFY__BUDGET_SECS=30`)
//! 3. Config file (`--config FILE`, else [`AppConfig::config_path`])
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use bindery_core::domain::{BuildSystem, Framework};

const ENV_PREFIX: &str = "BINDERY";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for `generate`.
    pub defaults: Defaults,
    pub catalog: CatalogConfig,
    pub services: ServicesConfig,
    pub output: OutputConfig,
    pub verify: VerifyConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub framework: Framework,
    pub build_system: BuildSystem,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog used when `--catalog` is not given.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Service directories loaded in addition to the built-ins.
    pub extra_dirs: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Wall-clock budget of one verification case.
    pub budget_secs: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            framework: Framework::Liberty,
            build_system: BuildSystem::Maven,
        }
    }
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self { budget_secs: 10 }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            catalog: CatalogConfig::default(),
            services: ServicesConfig::default(),
            output: OutputConfig::default(),
            verify: VerifyConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config_file` (or the default location),
    /// then the environment.  A missing file is not an error.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = config_file.cloned().unwrap_or_else(Self::config_path);
        Self::load_from(&path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(path: &Path, env: Environment) -> anyhow::Result<Self> {
        let settings = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(
                env.prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("services.extra_dirs"),
            )
            .build()
            .with_context(|| format!("reading configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("invalid configuration values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.bindery.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "bindery", "bindery")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".bindery.toml"))
    }

    /// Look up one dotted key for `config get`.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "defaults.framework" => self.defaults.framework.to_string(),
            "defaults.build_system" => self.defaults.build_system.to_string(),
            "catalog.path" => self
                .catalog
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "services.extra_dirs" => self
                .services
                .extra_dirs
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(","),
            "output.no_color" => self.output.no_color.to_string(),
            "verify.budget_secs" => self.verify.budget_secs.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Every key [`Self::get`] understands.
    pub const KEYS: [&'static str; 6] = [
        "defaults.framework",
        "defaults.build_system",
        "catalog.path",
        "services.extra_dirs",
        "output.no_color",
        "verify.budget_secs",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    #[test]
    fn defaults_are_liberty_and_maven() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.framework, Framework::Liberty);
        assert_eq!(cfg.defaults.build_system, BuildSystem::Maven);
        assert_eq!(cfg.verify.budget_secs, 10);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(&temp.path().join("none.toml"), no_env()).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "[defaults]\nframework = \"spring\"\n\n[catalog]\npath = \"bluemix.json\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path, no_env()).unwrap();
        assert_eq!(cfg.defaults.framework, Framework::Spring);
        assert_eq!(cfg.defaults.build_system, BuildSystem::Maven);
        assert_eq!(cfg.catalog.path, Some(PathBuf::from("bluemix.json")));
    }

    #[test]
    fn environment_overrides_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[verify]\nbudget_secs = 20\n").unwrap();

        let env = Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::from([
            ("BINDERY_VERIFY__BUDGET_SECS".to_string(), "30".to_string()),
            ("BINDERY_DEFAULTS__BUILD_SYSTEM".to_string(), "gradle".to_string()),
        ])));
        let cfg = AppConfig::load_from(&path, env).unwrap();
        assert_eq!(cfg.verify.budget_secs, 30);
        assert_eq!(cfg.defaults.build_system, BuildSystem::Gradle);
    }

    #[test]
    fn unknown_framework_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[defaults]\nframework = \"node\"\n").unwrap();
        assert!(AppConfig::load_from(&path, no_env()).is_err());
    }

    #[test]
    fn serialized_default_round_trips_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, AppConfig::default());
    }

    #[test]
    fn every_listed_key_resolves() {
        let cfg = AppConfig::default();
        for key in AppConfig::KEYS {
            assert!(cfg.get(key).is_some(), "{key}");
        }
        assert_eq!(cfg.get("defaults.framework").as_deref(), Some("liberty"));
        assert!(cfg.get("defaults.language").is_none());
    }
}
