//! Command handlers, one module per subcommand.
//!
//! Shared wiring lives here: every command that touches services builds the
//! same store (built-ins plus `services.extra_dirs`) and resolves the
//! catalog document the same way.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use bindery_adapters::{
    FilesystemServiceLoader, HandlebarsRenderer, InMemoryServiceStore, LocalFilesystem,
};
use bindery_core::{
    application::{GenerateService, ServiceStore},
    domain::ServiceCatalog,
};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
};

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod list;
pub mod verify;

/// Built-in definitions plus any loaded from `services.extra_dirs`.
/// A definition loaded from disk replaces a built-in with the same key.
pub(crate) fn service_store(config: &AppConfig) -> CliResult<InMemoryServiceStore> {
    let store = InMemoryServiceStore::with_builtin()?;

    if !config.services.extra_dirs.is_empty() {
        let loaded = FilesystemServiceLoader::new().load_all(config.services.extra_dirs.as_slice())?;
        info!(count = loaded.len(), "Loaded service definitions from disk");
        for definition in loaded {
            store.insert(definition)?;
        }
    }

    debug!(services = store.len(), "Service store ready");
    Ok(store)
}

/// A generator writing to the local disk.
pub(crate) fn generator(config: &AppConfig) -> CliResult<GenerateService> {
    Ok(GenerateService::new(
        Box::new(service_store(config)?),
        Box::new(HandlebarsRenderer::new()),
        Box::new(LocalFilesystem::new()),
    ))
}

/// `--catalog` wins over `catalog.path`; one of them is required.
pub(crate) fn catalog_path(flag: Option<PathBuf>, config: &AppConfig) -> CliResult<PathBuf> {
    flag.or_else(|| config.catalog.path.clone())
        .ok_or(CliError::MissingCatalog)
}

/// Read and parse a catalog document.
pub(crate) fn load_catalog(path: &Path) -> CliResult<ServiceCatalog> {
    if !path.exists() {
        return Err(CliError::CatalogNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path)
        .with_cli_context(|| format!("Failed to read catalog '{}'", path.display()))?;
    let catalog = ServiceCatalog::from_json_str(&text).map_err(|e| CliError::Core(e.into()))?;
    debug!(path = %path.display(), instances = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn flag_overrides_config_catalog() {
        let mut config = AppConfig::default();
        config.catalog.path = Some(PathBuf::from("from-config.json"));

        let path = catalog_path(Some(PathBuf::from("flag.json")), &config).unwrap();
        assert_eq!(path, PathBuf::from("flag.json"));

        let path = catalog_path(None, &config).unwrap();
        assert_eq!(path, PathBuf::from("from-config.json"));
    }

    #[test]
    fn missing_catalog_is_user_error() {
        let err = catalog_path(None, &AppConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::MissingCatalog));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn load_catalog_reports_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load_catalog(&temp.path().join("bluemix.json")).unwrap_err();
        assert!(matches!(err, CliError::CatalogNotFound { .. }));
    }

    #[test]
    fn load_catalog_rejects_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bluemix.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_catalog(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn store_includes_builtins() {
        let store = service_store(&AppConfig::default()).unwrap();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn unreadable_extra_dir_fails() {
        let temp = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.services.extra_dirs = vec![temp.path().join("missing")];
        assert!(service_store(&config).is_err());
    }
}
