use anyhow::Result;
use clap::Parser;
use spm::commands::{add, init, install};
use std::path::PathBuf;

/// spm - a minimal package manager
///
/// Declare dependencies in package.json and install them, together with
/// their own dependencies, from an npm-compatible registry.
///
/// If the SPM_TOKEN environment variable is set, it is sent as a bearer
/// token with every registry request.
///
/// Examples:
///   spm init                  # Create package.json interactively
///   spm add left-pad@^1.3.0   # Declare a dependency
///   spm install               # Install everything into node_modules
#[derive(Parser, Debug)]
#[command(author, version = env!("SPM_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project directory (defaults to the current directory; also via SPM_ROOT)
    #[arg(
        long = "root",
        short = 'r',
        env = "SPM_ROOT",
        value_name = "PATH",
        global = true
    )]
    pub project_root: Option<PathBuf>,

    /// Registry URL (defaults to https://registry.npmjs.org)
    #[arg(long = "registry", env = "SPM_REGISTRY", value_name = "URL", global = true)]
    pub registry: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Create package.json for a new project
    Init,

    /// Add a dependency to package.json
    Add(AddArgs),

    /// Install all dependencies listed in package.json
    Install,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// The package, optionally with a version: "name" or "name@version"
    #[arg(value_name = "NAME[@VERSION]")]
    pub package: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = spm::runtime::RealRuntime;

    match cli.command {
        Commands::Init => init(runtime, cli.project_root)?,
        Commands::Add(args) => add(runtime, &args.package, cli.project_root)?,
        Commands::Install => install(runtime, cli.project_root, cli.registry).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_add_parsing() {
        let cli = Cli::try_parse_from(["spm", "add", "left-pad@1.3.0"]).unwrap();
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.package, "left-pad@1.3.0");
            }
            _ => panic!("Expected Add command"),
        }
    }

    #[test]
    fn test_cli_install_parsing() {
        let cli = Cli::try_parse_from(["spm", "install"]).unwrap();
        assert!(matches!(cli.command, Commands::Install));
    }

    #[test]
    fn test_cli_init_parsing() {
        let cli = Cli::try_parse_from(["spm", "init"]).unwrap();
        assert!(matches!(cli.command, Commands::Init));
    }

    #[test]
    fn test_cli_root_parsing() {
        let cli = Cli::try_parse_from(["spm", "install", "--root", "/tmp/project"]).unwrap();
        assert_eq!(cli.project_root, Some(PathBuf::from("/tmp/project")));
    }

    #[test]
    fn test_cli_global_options_before_subcommand() {
        let cli = Cli::try_parse_from([
            "spm",
            "-r",
            "/tmp/project",
            "--registry",
            "http://localhost:4873",
            "install",
        ])
        .unwrap();
        assert_eq!(cli.project_root, Some(PathBuf::from("/tmp/project")));
        assert_eq!(cli.registry.as_deref(), Some("http://localhost:4873"));
    }

    #[test]
    fn test_cli_add_requires_package() {
        assert!(Cli::try_parse_from(["spm", "add"]).is_err());
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        assert!(Cli::try_parse_from(["spm", "left-pad"]).is_err());
    }
}
