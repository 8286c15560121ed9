//! The installed-set store (`node_modules.json`): package name to installed version.

use anyhow::{Context, Result};
use log::debug;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

/// Package name to installed version string. At most one version per name.
pub type InstalledRecord = BTreeMap<String, String>;

/// Persisted record of what has been installed.
///
/// Nothing is cached: every query reloads the file and every update is
/// written through before returning. Writes go to a temporary file that is
/// renamed over the store, so readers never observe a half-written table.
pub struct InstalledStore<'a, R: Runtime> {
    runtime: &'a R,
    path: PathBuf,
}

impl<'a, R: Runtime> InstalledStore<'a, R> {
    pub fn new(runtime: &'a R, path: PathBuf) -> Self {
        Self { runtime, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record, creating an empty store file if there is none yet.
    #[tracing::instrument(skip(self))]
    pub fn load(&self) -> Result<InstalledRecord> {
        if !self.runtime.exists(&self.path) {
            debug!("Creating empty installed-set store at {:?}", self.path);
            self.save(&InstalledRecord::new())?;
            return Ok(InstalledRecord::new());
        }

        let content = self.runtime.read_to_string(&self.path)?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid installed-set store at {:?}", self.path))
    }

    /// Whether `name` is recorded at exactly `version` (plain string equality).
    pub fn is_installed_at(&self, name: &str, version: &str) -> Result<bool> {
        Ok(self.load()?.get(name).is_some_and(|v| v == version))
    }

    /// Record `name` at `version`, replacing any earlier entry, and persist it.
    #[tracing::instrument(skip(self))]
    pub fn record_installed(&self, name: &str, version: &str) -> Result<()> {
        let mut record = self.load()?;
        record.insert(name.to_string(), version.to_string());
        self.save(&record)
    }

    fn save(&self, record: &InstalledRecord) -> Result<()> {
        let json = serde_json::to_string_pretty(record)?;
        let tmp_path = self.path.with_extension("json.tmp");
        self.runtime
            .write(&tmp_path, json.as_bytes())
            .with_context(|| format!("Failed to write {:?}", tmp_path))?;
        self.runtime
            .rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to save installed-set store to {:?}", self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{MockRuntime, RealRuntime};
    use mockall::predicate::eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_creates_empty_store() {
        let dir = tempdir().unwrap();
        let runtime = RealRuntime;
        let path = dir.path().join("node_modules.json");
        let store = InstalledStore::new(&runtime, path.clone());

        let record = store.load().unwrap();

        assert!(record.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_load_does_not_touch_existing_store() {
        let mut runtime = MockRuntime::new();
        let path = PathBuf::from("/p/node_modules.json");

        runtime
            .expect_exists()
            .with(eq(path.clone()))
            .returning(|_| true);
        runtime
            .expect_read_to_string()
            .with(eq(path.clone()))
            .returning(|_| Ok(r#"{"left-pad": "1.3.0"}"#.into()));
        // No write expectation: writing would panic

        let store = InstalledStore::new(&runtime, path);
        let record = store.load().unwrap();
        assert_eq!(record.get("left-pad").map(String::as_str), Some("1.3.0"));
    }

    #[test]
    fn test_is_installed_at_is_exact_string_match() {
        let dir = tempdir().unwrap();
        let runtime = RealRuntime;
        let store = InstalledStore::new(&runtime, dir.path().join("node_modules.json"));

        store.record_installed("a", "^1.2.3").unwrap();

        assert!(store.is_installed_at("a", "^1.2.3").unwrap());
        assert!(!store.is_installed_at("a", "1.2.3").unwrap());
        assert!(!store.is_installed_at("b", "^1.2.3").unwrap());
    }

    #[test]
    fn test_record_installed_overwrites() {
        let dir = tempdir().unwrap();
        let runtime = RealRuntime;
        let path = dir.path().join("node_modules.json");
        let store = InstalledStore::new(&runtime, path.clone());

        store.record_installed("a", "latest").unwrap();
        store.record_installed("b", "2.0.0").unwrap();
        store.record_installed("a", "3.1.4").unwrap();

        let record = store.load().unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record["a"], "3.1.4");
        assert_eq!(record["b"], "2.0.0");
        assert!(!dir.path().join("node_modules.json.tmp").exists());
    }

    #[test]
    fn test_record_installed_is_visible_to_a_fresh_store() {
        let dir = tempdir().unwrap();
        let runtime = RealRuntime;
        let path = dir.path().join("node_modules.json");

        InstalledStore::new(&runtime, path.clone())
            .record_installed("left-pad", "1.3.0")
            .unwrap();

        let reopened = InstalledStore::new(&runtime, path);
        assert!(reopened.is_installed_at("left-pad", "1.3.0").unwrap());
    }

    #[test]
    fn test_corrupt_store_is_an_error() {
        let dir = tempdir().unwrap();
        let runtime = RealRuntime;
        let path = dir.path().join("node_modules.json");
        std::fs::write(&path, "not json").unwrap();

        let store = InstalledStore::new(&runtime, path);
        assert!(store.load().is_err());
        assert!(store.record_installed("a", "1.0.0").is_err());
    }
}
