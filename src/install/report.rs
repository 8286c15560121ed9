use super::InstallError;

/// Where a single visited package ended up.
#[derive(Debug)]
pub enum InstallOutcome {
    /// Downloaded and unpacked at the resolved version.
    Installed { version: String },
    /// Already recorded at the requested specifier; no network access.
    AlreadyInstalled,
    Failed(InstallError),
}

impl InstallOutcome {
    pub fn is_installed(&self) -> bool {
        matches!(self, InstallOutcome::Installed { .. })
    }

    pub fn is_circular(&self) -> bool {
        matches!(
            self,
            InstallOutcome::Failed(InstallError::CircularDependency { .. })
        )
    }

    pub fn error(&self) -> Option<&InstallError> {
        match self {
            InstallOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct ReportEntry {
    pub name: String,
    pub specifier: String,
    pub outcome: InstallOutcome,
}

/// Every node visited by a traversal, in visiting order.
#[derive(Debug, Default)]
pub struct InstallReport {
    pub entries: Vec<ReportEntry>,
}

impl InstallReport {
    pub fn push(&mut self, name: &str, specifier: &str, outcome: InstallOutcome) {
        self.entries.push(ReportEntry {
            name: name.to_string(),
            specifier: specifier.to_string(),
            outcome,
        });
    }

    pub fn extend(&mut self, other: InstallReport) {
        self.entries.extend(other.entries);
    }

    pub fn installed(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| e.outcome.is_installed())
    }

    pub fn installed_count(&self) -> usize {
        self.installed().count()
    }

    pub fn circular_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome.is_circular())
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| e.outcome.error().is_some())
    }

    /// Outcome of the first visit of `name`.
    pub fn outcome_of(&self, name: &str) -> Option<&InstallOutcome> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.outcome)
    }
}
