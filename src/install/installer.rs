use anyhow::Result;
use log::{debug, info, warn};
use std::error::Error as _;

use super::{InstallError, InstallOutcome, InstallReport, TraversalGuard};
use crate::{
    archive::Unpacker,
    package::{
        DependencyEdge, InstalledStore, ManifestStore, ProjectLayout, VersionSpecifier,
        is_valid_package_name, read_dependencies,
    },
    registry::Registry,
    runtime::Runtime,
};

type Visit = (InstallOutcome, Vec<DependencyEdge>);

pub struct Installer<R: Runtime, G: Registry, U: Unpacker> {
    pub runtime: R,
    pub registry: G,
    pub unpacker: U,
    pub layout: ProjectLayout,
}

impl<R: Runtime, G: Registry, U: Unpacker> Installer<R, G, U> {
    #[tracing::instrument(skip(runtime, registry, unpacker))]
    pub fn new(runtime: R, registry: G, unpacker: U, layout: ProjectLayout) -> Self {
        Self {
            runtime,
            registry,
            unpacker,
            layout,
        }
    }

    fn manifest(&self) -> ManifestStore<'_, R> {
        ManifestStore::new(&self.runtime, self.layout.manifest_path())
    }

    fn installed(&self) -> InstalledStore<'_, R> {
        InstalledStore::new(&self.runtime, self.layout.installed_path())
    }

    /// Install every dependency declared in the project manifest.
    ///
    /// Each top-level dependency is walked with its own [`TraversalGuard`],
    /// so a cycle that only closes across two different top-level entries is
    /// not reported as one. Such a cycle still terminates: the second walk
    /// finds the packages already recorded and only re-reads their manifests
    /// until its own guard trips.
    ///
    /// Errors only for an unreadable project manifest; per-package failures
    /// are part of the report.
    #[tracing::instrument(skip(self))]
    pub async fn install_all(&self) -> Result<InstallReport> {
        let mut report = InstallReport::default();

        let Some(dependencies) = self.manifest().dependencies()? else {
            println!("{}", InstallError::SetupMissing);
            return Ok(report);
        };

        for edge in dependencies {
            println!("Installing {}@{}...", edge.name, edge.specifier);
            let mut guard = TraversalGuard::new();
            report.extend(self.install(&edge.name, &edge.specifier, &mut guard).await);
        }

        info!(
            "{} package(s) installed, {} problem(s)",
            report.installed_count(),
            report.failures().count()
        );
        Ok(report)
    }

    /// Install `name` and, depth first, everything it depends on.
    ///
    /// `guard` is shared by the whole subtree; a package already in it is
    /// reported as a circular dependency and not descended into. Failures
    /// abandon only the branch they occur in.
    #[tracing::instrument(skip(self, guard))]
    pub async fn install(
        &self,
        name: &str,
        specifier: &VersionSpecifier,
        guard: &mut TraversalGuard,
    ) -> InstallReport {
        let mut report = InstallReport::default();
        let mut pending = vec![DependencyEdge {
            name: name.to_string(),
            specifier: specifier.clone(),
        }];

        while let Some(edge) = pending.pop() {
            let (outcome, children) = self.visit(&edge, guard).await;
            report.push(&edge.name, edge.specifier.raw(), outcome);
            // Reversed so the first declared dependency is visited next
            pending.extend(children.into_iter().rev());
        }

        report
    }

    async fn visit(&self, edge: &DependencyEdge, guard: &mut TraversalGuard) -> Visit {
        match self.try_visit(edge, guard).await {
            Ok(visit) => visit,
            Err(e) => {
                println!("{}", e);
                if let Some(source) = e.source() {
                    warn!("{}@{}: {:#}", edge.name, edge.specifier, source);
                }
                (InstallOutcome::Failed(e), vec![])
            }
        }
    }

    async fn try_visit(
        &self,
        edge: &DependencyEdge,
        guard: &mut TraversalGuard,
    ) -> Result<Visit, InstallError> {
        let name = edge.name.as_str();
        let raw = edge.specifier.raw();

        // Names come from downloaded manifests and become paths under node_modules
        if !is_valid_package_name(name) {
            return Err(InstallError::InvalidName {
                name: name.to_string(),
            });
        }

        if !guard.enter(name) {
            return Err(InstallError::CircularDependency {
                name: name.to_string(),
            });
        }

        if !self.manifest().exists() {
            return Err(InstallError::SetupMissing);
        }

        let installed = self.installed();
        let store_err = |source| InstallError::Store {
            name: name.to_string(),
            source,
        };

        if installed.is_installed_at(name, raw).map_err(store_err)? {
            println!("{}@{} is already installed.", name, raw);
            // The files may have been put there without their own dependencies
            return Ok((InstallOutcome::AlreadyInstalled, self.sub_dependencies(name)));
        }

        // Recorded before anything is downloaded. An interrupted install
        // leaves the store claiming a version that is not on disk.
        installed.record_installed(name, raw).map_err(store_err)?;

        let lookup = edge.specifier.lookup_version();
        let package_info = self.registry.resolve(name, lookup).await.map_err(|source| {
            InstallError::RegistryLookupFailed {
                name: name.to_string(),
                version: lookup.to_string(),
                source,
            }
        })?;

        let version = if edge.specifier.is_latest() {
            installed
                .record_installed(name, &package_info.version)
                .map_err(store_err)?;
            package_info.version.clone()
        } else {
            lookup.to_string()
        };
        debug!("{}@{} resolved to {}", name, raw, version);

        let url = package_info.tarball_url();
        let archive = self.registry.fetch_archive(url).await.map_err(|source| {
            InstallError::ArchiveFetchFailed {
                name: name.to_string(),
                url: url.to_string(),
                source,
            }
        })?;

        let package_dir = self.layout.package_dir(name);
        self.runtime
            .create_dir_all(&package_dir)
            .and_then(|()| self.unpacker.unpack(&archive, &package_dir))
            .map_err(|source| InstallError::Unpack {
                name: name.to_string(),
                path: package_dir.clone(),
                source,
            })?;

        println!("Installed {}@{}", name, version);

        Ok((
            InstallOutcome::Installed { version },
            self.sub_dependencies(name),
        ))
    }

    /// Dependencies declared by the unpacked copy of `name`.
    fn sub_dependencies(&self, name: &str) -> Vec<DependencyEdge> {
        let path = self.layout.package_manifest_path(name);
        match read_dependencies(&self.runtime, &path) {
            Ok(dependencies) => {
                debug!("{} declares {} dependencies", name, dependencies.len());
                dependencies
            }
            Err(e) => {
                warn!("Ignoring unreadable manifest {:?}: {:#}", path, e);
                vec![]
            }
        }
    }
}
