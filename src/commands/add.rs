//! `spm add <name[@version]>`

use anyhow::{Result, anyhow};
use std::path::PathBuf;
use std::str::FromStr;

use super::paths::project_layout;
use crate::package::{LATEST, MANIFEST_FILE, ManifestStore};
use crate::runtime::Runtime;

/// A package argument: `name` or `name@version`, where `name` may be scoped.
#[derive(Debug, PartialEq, Clone)]
pub struct AddSpec {
    pub name: String,
    pub version: String,
}

impl std::fmt::Display for AddSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

impl FromStr for AddSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // A leading '@' belongs to a scope, not to the version
        let (name, version) = match s.rfind('@') {
            Some(at_pos) if at_pos > 0 => {
                let (name, ver) = s.split_at(at_pos);
                let ver = &ver[1..];
                if ver.is_empty() {
                    return Err(anyhow!(
                        "Invalid format: version after @ cannot be empty. Expected 'name@version'."
                    ));
                }
                (name, ver)
            }
            _ => (s, LATEST),
        };

        if name.is_empty() || name == "@" {
            return Err(anyhow!("Invalid format: package name cannot be empty."));
        }

        Ok(AddSpec {
            name: name.to_string(),
            version: version.to_string(),
        })
    }
}

/// Declare a dependency in the project manifest.
#[tracing::instrument(skip(runtime, root))]
pub fn add<R: Runtime>(runtime: R, package: &str, root: Option<PathBuf>) -> Result<()> {
    let spec = package.parse::<AddSpec>()?;
    let layout = project_layout(&runtime, root)?;
    let store = ManifestStore::new(&runtime, layout.manifest_path());

    if store.add_dependency(&spec.name, &spec.version)? {
        println!("Added {} to {}", spec, MANIFEST_FILE);
    } else {
        println!(
            "{} has not been created, run init command first",
            MANIFEST_FILE
        );
    }
    Ok(())
}
