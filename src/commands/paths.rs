use anyhow::Result;
use log::info;
use std::path::PathBuf;

use crate::package::ProjectLayout;
use crate::runtime::Runtime;

/// Resolve the project root: the explicit `root`, or the current directory.
#[tracing::instrument(skip(runtime))]
pub fn project_layout<R: Runtime>(runtime: &R, root: Option<PathBuf>) -> Result<ProjectLayout> {
    let root = match root {
        Some(path) => path,
        None => runtime.current_dir()?,
    };

    info!("Using project root: {}", root.display());
    Ok(ProjectLayout::new(root))
}
