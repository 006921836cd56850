use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "import-precheck",
    version,
    about = "Check whether a disk's operating system can be imported as a cloud image"
)]
pub struct Cli {
    /// Override the supported-OS catalog with a JSON file ({"os_ids": [...]})
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Output machine-readable JSON
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run all prechecks against a mounted disk (or explicit OS values)
    Check {
        /// Root of the disk's filesystem tree, used to read etc/os-release.
        /// For roots other than "/" the architecture is read from the disk's
        /// binaries; pass --arch when it cannot be detected
        #[arg(long, default_value = "/")]
        root: PathBuf,
        /// Override the detected OS short name (e.g. centos, windows, linux)
        #[arg(long)]
        short_name: Option<String>,
        /// Override the detected OS version (e.g. 7.9, 10.0)
        #[arg(long)]
        os_version: Option<String>,
        /// Override the detected architecture (e.g. x86_64, x64, aarch64)
        #[arg(long)]
        arch: Option<String>,
        /// Exit non-zero when a check is skipped (support undetermined)
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// List operating system identifiers supported for import
    ListSupported,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum, default_value_t = Shell::Bash)]
        shell: Shell,
    },
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_check_with_overrides() {
        let cli = Cli::try_parse_from([
            "import-precheck",
            "--json",
            "check",
            "--short-name",
            "windows",
            "--os-version",
            "10.0",
            "--strict",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Check { root, short_name, os_version, arch, strict } => {
                assert_eq!(root, PathBuf::from("/"));
                assert_eq!(short_name.as_deref(), Some("windows"));
                assert_eq!(os_version.as_deref(), Some("10.0"));
                assert!(arch.is_none());
                assert!(strict);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["import-precheck", "list-supported", "--catalog", "c.json"])
            .unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("c.json")));
        assert!(matches!(cli.command, Commands::ListSupported));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
