//! `spm init`

use anyhow::Result;
use std::path::PathBuf;

use super::paths::project_layout;
use crate::package::{MANIFEST_FILE, ManifestStore, ProjectInfo};
use crate::runtime::Runtime;

/// Ask for the project details and write a fresh manifest.
#[tracing::instrument(skip(runtime, root))]
pub fn init<R: Runtime>(runtime: R, root: Option<PathBuf>) -> Result<()> {
    let layout = project_layout(&runtime, root)?;
    let store = ManifestStore::new(&runtime, layout.manifest_path());

    if store.exists() {
        println!("{} already exists", MANIFEST_FILE);
        return Ok(());
    }

    let info = ProjectInfo {
        name: runtime.prompt("Project name")?,
        version: runtime.prompt("Project version")?,
        description: runtime.prompt("Project description")?,
        author: runtime.prompt("Project author")?,
        license: runtime.prompt("License for this project")?,
    };

    if store.init(info)? {
        println!("Wrote {}", store.path().display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    #[test]
    fn test_init_prompts_and_writes_manifest() {
        let mut runtime = MockRuntime::new();
        let manifest = PathBuf::from("/project/package.json");
        let tmp = PathBuf::from("/project/package.json.tmp");

        runtime
            .expect_exists()
            .with(eq(manifest.clone()))
            .returning(|_| false);

        for (prompt, answer) in [
            ("Project name", "demo"),
            ("Project version", "0.1.0"),
            ("Project description", "A demo project"),
            ("Project author", "someone"),
            ("License for this project", "MIT"),
        ] {
            runtime
                .expect_prompt()
                .with(eq(prompt))
                .times(1)
                .returning(move |_| Ok(answer.to_string()));
        }

        runtime
            .expect_write()
            .withf(|path, contents| {
                let json: serde_json::Value = serde_json::from_slice(contents).unwrap();
                path == std::path::Path::new("/project/package.json.tmp")
                    && json["name"] == "demo"
                    && json["license"] == "MIT"
                    && json.get("dependencies").is_none()
            })
            .times(1)
            .returning(|_, _| Ok(()));
        runtime
            .expect_rename()
            .with(eq(tmp), eq(manifest))
            .times(1)
            .returning(|_, _| Ok(()));

        init(runtime, Some(PathBuf::from("/project"))).unwrap();
    }

    #[test]
    fn test_init_keeps_existing_manifest_without_prompting() {
        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|_| true);
        // No prompt/write expectations: calling them would panic

        init(runtime, Some(PathBuf::from("/project"))).unwrap();
    }
}
