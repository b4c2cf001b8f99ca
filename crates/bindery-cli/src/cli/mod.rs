//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use bindery_core::domain::{BuildSystem, Framework};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "bindery",
    bin_name = "bindery",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Cloud service binding scaffolding for Java applications",
    long_about = "Bindery generates the credential classes, framework configuration \
                  and build manifest entries a Liberty or Spring application needs \
                  to consume the services bound in a catalog document.",
    after_help = "EXAMPLES:\n\
        \x20 bindery generate orders --framework liberty --build maven --catalog bluemix.json\n\
        \x20 bindery generate orders -f spring -b gradle --catalog bluemix.json -s cloudant\n\
        \x20 bindery list --framework spring\n\
        \x20 bindery verify --catalog bluemix.json\n\
        \x20 bindery completions bash > /usr/share/bash-completion/completions/bindery",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a project bound to catalog services.
    #[command(
        visible_alias = "g",
        about = "Generate a project",
        after_help = "EXAMPLES:\n\
            \x20 bindery generate orders --catalog bluemix.json\n\
            \x20 bindery generate orders -f spring -b gradle --catalog bluemix.json\n\
            \x20 bindery generate orders --catalog bluemix.json -s dashDb -s cloudant --dry-run"
    )]
    Generate(GenerateArgs),

    /// List known services.
    #[command(
        visible_alias = "ls",
        about = "List known services",
        after_help = "EXAMPLES:\n\
            \x20 bindery list\n\
            \x20 bindery list --framework liberty\n\
            \x20 bindery list --format json"
    )]
    List(ListArgs),

    /// Generate and check every service combination.
    #[command(
        about = "Verify generated projects",
        after_help = "EXAMPLES:\n\
            \x20 bindery verify --catalog bluemix.json\n\
            \x20 bindery verify --catalog bluemix.json -f spring -b gradle\n\
            \x20 bindery verify --catalog bluemix.json -s cloudant --output-format json"
    )]
    Verify(VerifyArgs),

    /// Initialise a Bindery configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 bindery init                       # default location\n\
            \x20 bindery init --force               # overwrite\n\
            \x20 bindery --config ./bindery.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 bindery completions bash > ~/.local/share/bash-completion/completions/bindery\n\
            \x20 bindery completions zsh  > ~/.zfunc/_bindery\n\
            \x20 bindery completions fish > ~/.config/fish/completions/bindery.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Bindery configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 bindery config get defaults.framework\n\
            \x20 bindery config list\n\
            \x20 bindery config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `bindery generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Project name; also the directory created under `--output`.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    #[arg(
        short = 'f',
        long = "framework",
        value_enum,
        help = "Target framework [default: from config, else liberty]"
    )]
    pub framework: Option<FrameworkArg>,

    #[arg(
        short = 'b',
        long = "build",
        value_enum,
        help = "Build system [default: from config, else maven]"
    )]
    pub build_system: Option<BuildArg>,

    /// Catalog document describing the bound services.
    #[arg(
        long = "catalog",
        value_name = "FILE",
        help = "Catalog JSON file [default: catalog.path from config]"
    )]
    pub catalog: Option<PathBuf>,

    /// Services to bind. Defaults to every catalog entry with a definition.
    #[arg(
        short = 's',
        long = "service",
        value_name = "KEY",
        help = "Catalog key of a service to bind (repeatable)"
    )]
    pub services: Vec<String>,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        default_value = ".",
        help = "Directory the project is created in"
    )]
    pub output: PathBuf,

    /// Overwrite an existing directory (destructive).
    #[arg(long = "force", help = "Overwrite existing directory")]
    pub force: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `bindery list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(short = 'f', long = "framework", value_enum, help = "Filter by framework")]
    pub framework: Option<FrameworkArg>,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One catalog key per line.
    List,
    /// JSON array.
    Json,
}

// ── verify ────────────────────────────────────────────────────────────────────

/// Arguments for `bindery verify`.
#[derive(Debug, Args)]
pub struct VerifyArgs {
    #[arg(
        long = "catalog",
        value_name = "FILE",
        help = "Catalog JSON file [default: catalog.path from config]"
    )]
    pub catalog: Option<PathBuf>,

    #[arg(short = 'f', long = "framework", value_enum, help = "Only this framework")]
    pub framework: Option<FrameworkArg>,

    #[arg(short = 'b', long = "build", value_enum, help = "Only this build system")]
    pub build_system: Option<BuildArg>,

    #[arg(short = 's', long = "service", value_name = "KEY", help = "Only this service")]
    pub service: Option<String>,

    /// Per-case wall-clock budget in seconds.
    #[arg(
        long = "budget",
        value_name = "SECS",
        help = "Per-case time budget in seconds [default: verify.budget_secs]"
    )]
    pub budget: Option<u64>,

    /// Keep generated projects under this directory instead of discarding them.
    #[arg(long = "keep", value_name = "DIR", help = "Keep generated projects in DIR")]
    pub keep: Option<PathBuf>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `bindery init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `bindery completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `bindery config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.framework`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Supported frameworks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FrameworkArg {
    #[value(alias = "java-liberty")]
    Liberty,
    #[value(alias = "java-spring")]
    Spring,
}

impl From<FrameworkArg> for Framework {
    fn from(arg: FrameworkArg) -> Self {
        match arg {
            FrameworkArg::Liberty => Framework::Liberty,
            FrameworkArg::Spring => Framework::Spring,
        }
    }
}

/// Supported build systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum BuildArg {
    #[value(alias = "mvn")]
    Maven,
    Gradle,
}

impl From<BuildArg> for BuildSystem {
    fn from(arg: BuildArg) -> Self {
        match arg {
            BuildArg::Maven => BuildSystem::Maven,
            BuildArg::Gradle => BuildSystem::Gradle,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_generate_command() {
        let cli = Cli::parse_from([
            "bindery",
            "generate",
            "orders",
            "--framework",
            "spring",
            "--build",
            "gradle",
            "--catalog",
            "bluemix.json",
            "-s",
            "dashDb",
            "-s",
            "cloudant",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.framework, Some(FrameworkArg::Spring));
        assert_eq!(args.build_system, Some(BuildArg::Gradle));
        assert_eq!(args.services, ["dashDb", "cloudant"]);
        assert_eq!(args.output, PathBuf::from("."));
    }

    #[test]
    fn framework_and_build_aliases() {
        let cli = Cli::parse_from(["bindery", "g", "app", "-f", "java-liberty", "-b", "mvn"]);
        if let Commands::Generate(args) = cli.command {
            assert_eq!(args.framework.map(Framework::from), Some(Framework::Liberty));
            assert_eq!(args.build_system.map(BuildSystem::from), Some(BuildSystem::Maven));
        } else {
            panic!("expected Generate command");
        }
    }

    #[test]
    fn node_is_not_a_framework() {
        assert!(Cli::try_parse_from(["bindery", "generate", "app", "-f", "node"]).is_err());
    }

    #[test]
    fn parse_verify_filters() {
        let cli = Cli::parse_from([
            "bindery", "verify", "--catalog", "c.json", "-f", "liberty", "-s", "dashDb",
        ]);
        let Commands::Verify(args) = cli.command else {
            panic!("expected Verify command");
        };
        assert_eq!(args.framework, Some(FrameworkArg::Liberty));
        assert_eq!(args.build_system, None);
        assert_eq!(args.service.as_deref(), Some("dashDb"));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["bindery", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
