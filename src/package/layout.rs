use std::path::{Component, Path, PathBuf};

pub const MANIFEST_FILE: &str = "package.json";
pub const INSTALLED_FILE: &str = "node_modules.json";
pub const NODE_MODULES_DIR: &str = "node_modules";

/// Directory npm tarballs nest their contents under.
pub const ARCHIVE_PREFIX: &str = "package";

/// Whether `name` is safe to use as a directory under `node_modules`.
///
/// Accepts `name` and `@scope/name`. Each segment must be a single plain path
/// component, so `.`, `..`, empty segments, absolute paths and drive prefixes
/// are rejected.
pub fn is_valid_package_name(name: &str) -> bool {
    let segments: Vec<&str> = name.split('/').collect();
    let shape_ok = match segments.as_slice() {
        [_] => !name.starts_with('@'),
        [scope, _] => scope.len() > 1 && scope.starts_with('@'),
        _ => false,
    };

    shape_ok
        && segments.iter().all(|segment| {
            !segment.is_empty()
                && !segment.contains('\\')
                && matches!(
                    Path::new(segment).components().collect::<Vec<_>>().as_slice(),
                    [Component::Normal(_)]
                )
        })
}

/// Locations of everything the package manager reads or writes inside a project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns: `<root>/package.json`
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// Returns: `<root>/node_modules.json`
    pub fn installed_path(&self) -> PathBuf {
        self.root.join(INSTALLED_FILE)
    }

    /// Returns: `<root>/node_modules`
    pub fn node_modules_dir(&self) -> PathBuf {
        self.root.join(NODE_MODULES_DIR)
    }

    /// Returns: `<root>/node_modules/<name>`
    ///
    /// Scoped names such as `@types/node` become nested directories. Callers
    /// check [`is_valid_package_name`] first; the name is joined as given.
    pub fn package_dir(&self, name: &str) -> PathBuf {
        name.split('/')
            .fold(self.node_modules_dir(), |dir, part| dir.join(part))
    }

    /// Returns: `<root>/node_modules/<name>/package/package.json`
    pub fn package_manifest_path(&self, name: &str) -> PathBuf {
        self.package_dir(name)
            .join(ARCHIVE_PREFIX)
            .join(MANIFEST_FILE)
    }
}
