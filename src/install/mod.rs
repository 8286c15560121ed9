//! Recursive dependency installation.
//!
//! [`Installer::install_all`] walks every dependency declared by the project
//! manifest. Each package is resolved through the [`Registry`](crate::registry::Registry),
//! unpacked into `node_modules/<name>`, recorded in the installed-set store,
//! and then its own manifest is walked the same way.

mod error;
mod guard;
mod installer;
mod report;

pub use error::InstallError;
pub use guard::TraversalGuard;
pub use installer::Installer;
pub use report::{InstallOutcome, InstallReport, ReportEntry};
