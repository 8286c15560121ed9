use std::path::PathBuf;
use thiserror::Error;

/// Why a single package in the dependency tree was not installed.
///
/// None of these abort the surrounding traversal: the failing branch is
/// abandoned and its siblings are still attempted.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("package.json has not been created, run init command first")]
    SetupMissing,

    #[error("Circular dependency detected at {name}; exiting installation")]
    CircularDependency { name: String },

    #[error("Invalid package name {name:?}; skipping")]
    InvalidName { name: String },

    #[error("Package retrieval for {name} for version {version} failed")]
    RegistryLookupFailed {
        name: String,
        version: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to download {name} from {url}")]
    ArchiveFetchFailed {
        name: String,
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to unpack {name} into {path:?}")]
    Unpack {
        name: String,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to update the installed-set store for {name}")]
    Store {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}
