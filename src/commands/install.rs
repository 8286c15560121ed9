//! `spm install`

use anyhow::Result;
use std::path::PathBuf;

use super::config::Config;
use crate::{
    archive::Unpacker,
    install::{InstallReport, Installer},
    registry::Registry,
    runtime::Runtime,
};

/// Install every dependency of the project at `root`.
#[tracing::instrument(skip(runtime, root, registry_url))]
pub async fn install<R: Runtime>(
    runtime: R,
    root: Option<PathBuf>,
    registry_url: Option<String>,
) -> Result<()> {
    let config = Config::new(runtime, root, registry_url)?;
    run(config).await?;
    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn run<R: Runtime, G: Registry, U: Unpacker>(
    config: Config<R, G, U>,
) -> Result<InstallReport> {
    let installer = Installer::new(
        config.runtime,
        config.registry,
        config.unpacker,
        config.layout,
    );
    installer.install_all().await
}
