//! Version specifiers as written in a manifest's `dependencies` table.

use std::fmt;

/// The registry tag that resolves to the newest published version.
pub const LATEST: &str = "latest";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMarker {
    /// `^1.2.3`
    Caret,
    /// `~1.2.3`
    Tilde,
}

impl RangeMarker {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '^' => Some(RangeMarker::Caret),
            '~' => Some(RangeMarker::Tilde),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierKind {
    Exact,
    Range(RangeMarker),
    Latest,
}

/// A dependency's version requirement.
///
/// Ranges are not solved: a range marker is simply stripped and the bare
/// version is looked up as if it were exact. The raw text is kept because
/// the installed-set store compares against it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpecifier {
    raw: String,
    kind: SpecifierKind,
}

impl VersionSpecifier {
    pub fn parse(raw: &str) -> Self {
        let kind = if raw == LATEST {
            SpecifierKind::Latest
        } else if let Some(marker) = raw.chars().next().and_then(RangeMarker::from_char) {
            SpecifierKind::Range(marker)
        } else {
            SpecifierKind::Exact
        };

        Self {
            raw: raw.to_string(),
            kind,
        }
    }

    /// The specifier exactly as declared, e.g. `^1.2.3`.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> SpecifierKind {
        self.kind
    }

    pub fn is_latest(&self) -> bool {
        self.kind == SpecifierKind::Latest
    }

    /// The version segment of the registry lookup URL: the raw text with a
    /// single leading `^`/`~` removed, or `latest`.
    pub fn lookup_version(&self) -> &str {
        match self.kind {
            SpecifierKind::Range(_) => &self.raw[1..],
            SpecifierKind::Exact | SpecifierKind::Latest => &self.raw,
        }
    }
}

impl From<&str> for VersionSpecifier {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for VersionSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// One entry of a `dependencies` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEdge {
    pub name: String,
    pub specifier: VersionSpecifier,
}

impl DependencyEdge {
    pub fn new(name: impl Into<String>, specifier: &str) -> Self {
        Self {
            name: name.into(),
            specifier: VersionSpecifier::parse(specifier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_version() {
        let spec = VersionSpecifier::parse("1.3.0");
        assert_eq!(spec.kind(), SpecifierKind::Exact);
        assert_eq!(spec.raw(), "1.3.0");
        assert_eq!(spec.lookup_version(), "1.3.0");
        assert!(!spec.is_latest());
    }

    #[test]
    fn test_caret_range_is_stripped_for_lookup() {
        let spec = VersionSpecifier::parse("^1.2.3");
        assert_eq!(spec.kind(), SpecifierKind::Range(RangeMarker::Caret));
        assert_eq!(spec.raw(), "^1.2.3");
        assert_eq!(spec.lookup_version(), "1.2.3");
    }

    #[test]
    fn test_tilde_range_is_stripped_for_lookup() {
        let spec = VersionSpecifier::parse("~1.2.3");
        assert_eq!(spec.kind(), SpecifierKind::Range(RangeMarker::Tilde));
        assert_eq!(spec.lookup_version(), "1.2.3");
    }

    #[test]
    fn test_only_one_marker_is_stripped() {
        let spec = VersionSpecifier::parse("^~1.0.0");
        assert_eq!(spec.lookup_version(), "~1.0.0");
    }

    #[test]
    fn test_latest() {
        let spec = VersionSpecifier::parse("latest");
        assert!(spec.is_latest());
        assert_eq!(spec.lookup_version(), "latest");
    }

    #[test]
    fn test_other_tags_are_exact() {
        // Only the literal `latest` tag gets special treatment
        let spec = VersionSpecifier::parse("next");
        assert_eq!(spec.kind(), SpecifierKind::Exact);
        assert_eq!(spec.lookup_version(), "next");
    }

    #[test]
    fn test_empty_specifier() {
        let spec = VersionSpecifier::parse("");
        assert_eq!(spec.kind(), SpecifierKind::Exact);
        assert_eq!(spec.lookup_version(), "");
    }

    #[test]
    fn test_display_is_raw() {
        assert_eq!(VersionSpecifier::parse("~2.0.1").to_string(), "~2.0.1");
    }

    #[test]
    fn test_dependency_edge() {
        let edge = DependencyEdge::new("b", "^2.0.0");
        assert_eq!(edge.name, "b");
        assert_eq!(edge.specifier.lookup_version(), "2.0.0");
    }
}
