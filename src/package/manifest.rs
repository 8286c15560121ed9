//! `package.json` handling for the project and for unpacked packages.

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use super::DependencyEdge;
use crate::runtime::Runtime;

const DEPENDENCIES_KEY: &str = "dependencies";

/// A package manifest.
///
/// Only `dependencies` is interpreted. The whole object, including every
/// field this crate does not know about, is kept as an ordered map so a
/// rewrite leaves each key where it was declared.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Manifest {
    pub fields: Map<String, Value>,
}

/// Answers collected by `spm init`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
    pub license: String,
}

impl From<ProjectInfo> for Manifest {
    fn from(info: ProjectInfo) -> Self {
        let mut fields = Map::new();
        fields.insert("name".into(), Value::String(info.name));
        fields.insert("version".into(), Value::String(info.version));
        fields.insert("description".into(), Value::String(info.description));
        fields.insert("author".into(), Value::String(info.author));
        fields.insert("license".into(), Value::String(info.license));
        Manifest { fields }
    }
}

impl Manifest {
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse manifest")
    }

    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime.read_to_string(path)?;
        Self::parse(&content).with_context(|| format!("Invalid manifest at {:?}", path))
    }

    /// The `dependencies` table, if present and an object.
    pub fn dependencies(&self) -> Option<&Map<String, Value>> {
        self.fields.get(DEPENDENCIES_KEY).and_then(Value::as_object)
    }

    /// Declared dependencies; a missing table reads as empty.
    pub fn dependency_edges(&self) -> Vec<DependencyEdge> {
        self.dependencies()
            .into_iter()
            .flatten()
            .filter_map(|(name, spec)| match spec.as_str() {
                Some(spec) => Some(DependencyEdge::new(name.as_str(), spec)),
                None => {
                    warn!("Skipping dependency {} with non-string version {}", name, spec);
                    None
                }
            })
            .collect()
    }

    /// Insert or overwrite a dependency, creating the table if needed.
    ///
    /// A `dependencies` value that is not an object is replaced.
    pub fn set_dependency(&mut self, name: &str, specifier: &str) {
        let table = self
            .fields
            .entry(DEPENDENCIES_KEY)
            .or_insert_with(|| Value::Object(Map::new()));
        if !table.is_object() {
            warn!("Replacing non-object {} value {}", DEPENDENCIES_KEY, table);
            *table = Value::Object(Map::new());
        }
        if let Value::Object(deps) = table {
            deps.insert(name.to_string(), Value::String(specifier.to_string()));
        }
    }
}

/// Read the dependency list of the manifest at `path`.
///
/// A missing file means the package declares nothing.
#[tracing::instrument(skip(runtime))]
pub fn read_dependencies<R: Runtime>(runtime: &R, path: &Path) -> Result<Vec<DependencyEdge>> {
    if !runtime.exists(path) {
        debug!("No manifest at {:?}", path);
        return Ok(vec![]);
    }
    Ok(Manifest::load(runtime, path)?.dependency_edges())
}

/// The project's own `package.json`.
pub struct ManifestStore<'a, R: Runtime> {
    runtime: &'a R,
    path: PathBuf,
}

impl<'a, R: Runtime> ManifestStore<'a, R> {
    pub fn new(runtime: &'a R, path: PathBuf) -> Self {
        Self { runtime, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.runtime.exists(&self.path)
    }

    /// Load the manifest. Returns `None` if the project has not been initialized.
    pub fn load(&self) -> Result<Option<Manifest>> {
        if !self.exists() {
            return Ok(None);
        }
        Manifest::load(self.runtime, &self.path).map(Some)
    }

    pub fn save(&self, manifest: &Manifest) -> Result<()> {
        let json = serde_json::to_string_pretty(manifest)?;
        let tmp_path = self.path.with_extension("json.tmp");
        self.runtime
            .write(&tmp_path, json.as_bytes())
            .with_context(|| format!("Failed to write {:?}", tmp_path))?;
        self.runtime
            .rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to save manifest to {:?}", self.path))
    }

    /// Create the manifest from `info`. An existing manifest is left alone.
    ///
    /// Returns whether a new manifest was written.
    #[tracing::instrument(skip(self, info))]
    pub fn init(&self, info: ProjectInfo) -> Result<bool> {
        if self.exists() {
            debug!("{:?} already exists, leaving it untouched", self.path);
            return Ok(false);
        }
        self.save(&Manifest::from(info))?;
        Ok(true)
    }

    /// Declare `name` at `specifier`. Returns `false` if there is no manifest.
    #[tracing::instrument(skip(self))]
    pub fn add_dependency(&self, name: &str, specifier: &str) -> Result<bool> {
        let Some(mut manifest) = self.load()? else {
            return Ok(false);
        };
        manifest.set_dependency(name, specifier);
        self.save(&manifest)?;
        Ok(true)
    }

    /// The project's declared dependencies, or `None` without a manifest.
    pub fn dependencies(&self) -> Result<Option<Vec<DependencyEdge>>> {
        Ok(self.load()?.map(|m| m.dependency_edges()))
    }
}
