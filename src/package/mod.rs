//! Package management module
//!
//! This module provides the project-side data: version specifiers, manifests,
//! the installed-set store and the on-disk layout of a project.

mod installed;
mod layout;
mod manifest;
mod specifier;

pub use installed::{InstalledRecord, InstalledStore};
pub use layout::{
    ARCHIVE_PREFIX, INSTALLED_FILE, MANIFEST_FILE, NODE_MODULES_DIR, ProjectLayout,
    is_valid_package_name,
};
pub use manifest::{Manifest, ManifestStore, ProjectInfo, read_dependencies};
pub use specifier::{DependencyEdge, LATEST, RangeMarker, SpecifierKind, VersionSpecifier};
