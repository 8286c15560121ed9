use std::collections::HashSet;

/// Names visited during one traversal.
///
/// Names are never removed once entered, so a package reached twice through
/// the same traversal is reported as a cycle even when the two paths are
/// independent branches.
#[derive(Debug, Default, Clone)]
pub struct TraversalGuard {
    visited: HashSet<String>,
}

impl TraversalGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `name` as visited. Returns `false` if it already was.
    pub fn enter(&mut self, name: &str) -> bool {
        self.visited.insert(name.to_string())
    }
}
