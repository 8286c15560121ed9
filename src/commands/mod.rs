//! Command entry points used by the CLI.

mod add;
pub mod config;
mod init;
mod install;
mod paths;

pub use add::{AddSpec, add};
pub use init::init;
pub use install::{install, run};
pub use paths::project_layout;
