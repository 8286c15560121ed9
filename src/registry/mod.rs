//! Registry lookups: resolve a package version and download its archive.

mod npm;
mod types;

use anyhow::Result;
use async_trait::async_trait;

pub use npm::{DEFAULT_REGISTRY_URL, NpmRegistry};
pub use types::{Dist, PackageInfo};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Registry: Send + Sync {
    /// Look up `name` at `version` (a bare version or the `latest` tag).
    async fn resolve(&self, name: &str, version: &str) -> Result<PackageInfo>;

    /// Download the archive at `url`.
    async fn fetch_archive(&self, url: &str) -> Result<Vec<u8>>;
}
