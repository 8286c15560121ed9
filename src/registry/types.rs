use serde::{Deserialize, Serialize};

/// Version document returned by `GET {registry}/{name}/{version}`.
///
/// Only the fields the installer needs are modelled; everything else in the
/// registry payload is ignored.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PackageInfo {
    #[serde(default)]
    pub name: Option<String>,
    pub version: String,
    pub dist: Dist,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Dist {
    /// URL of the gzip-compressed tarball.
    pub tarball: String,
}

impl PackageInfo {
    pub fn tarball_url(&self) -> &str {
        &self.dist.tarball
    }
}
