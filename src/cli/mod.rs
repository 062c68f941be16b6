//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};
pub use clap_complete::Shell;

use crate::scm::ScmKind;

pub mod completions;
pub mod context;
pub mod import;
pub mod prompt;

pub use context::ImportSettings;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - summary table
    #[default]
    Pretty,
    /// JSON format - structured for scripts/APIs
    Json,
}

/// Bulk-onboard source control organizations and repositories into Sonatype Lifecycle
#[derive(Parser, Debug)]
#[command(name = "scm-onboarder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Override config file location
    #[arg(long, global = true, env = "SCM_ONBOARDER_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'X', global = true, env = "SCM_ONBOARDER_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import an SCM hierarchy into Sonatype Lifecycle
    Import(ImportArgs),

    /// Display version information
    Version,

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   scm-onboarder completion bash > /etc/bash_completion.d/scm-onboarder
  zsh:    scm-onboarder completion zsh > \"${fpath[1]}/_scm-onboarder\"
  fish:   scm-onboarder completion fish > ~/.config/fish/completions/scm-onboarder.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options for the import command
#[derive(Debug, Clone, Args)]
pub struct ImportArgs {
    /// Source control system to load from
    #[arg(long, value_enum, default_value = "azure")]
    pub scm: ScmKind,

    /// URL including protocol to your Sonatype Lifecycle [default: http://localhost:8070]
    #[arg(long, env = "NXIQ_URL")]
    pub url: Option<String>,

    /// Username used to authenticate to Sonatype Lifecycle (prompted when absent)
    #[arg(long, env = "NXIQ_USERNAME")]
    pub username: Option<String>,

    /// Password used to authenticate to Sonatype Lifecycle (prompted when absent)
    #[arg(long, env = "NXIQ_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Azure DevOps personal access token (prompted when absent)
    #[arg(long, env = "SCM_ADO_PAT", hide_env_values = true)]
    pub azure_pat: Option<String>,

    /// Name of Organization to import structure into [default: Root Organization]
    #[arg(long)]
    pub org_name: Option<String>,

    /// Replace single spaces in names with '-'
    #[arg(long)]
    pub hyphenate_spaces: bool,

    /// Leave source control settings of existing organizations untouched
    #[arg(long)]
    pub no_scm_refresh: bool,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Show what would be imported without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for the import summary
    #[arg(long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,

    /// Azure DevOps profile API host
    #[arg(long, env = "SCM_ADO_PROFILE_HOST", hide = true)]
    pub azure_profile_host: Option<String>,

    /// Azure DevOps core API host
    #[arg(long, env = "SCM_ADO_API_HOST", hide = true)]
    pub azure_api_host: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_import_defaults() {
        let cli = Cli::try_parse_from(["scm-onboarder", "import"]).unwrap();
        match cli.command {
            Commands::Import(args) => {
                assert_eq!(args.scm, ScmKind::Azure);
                assert_eq!(args.format, OutputFormat::Pretty);
                assert!(!args.yes);
                assert!(!args.hyphenate_spaces);
            }
            other => panic!("expected import, got {:?}", other),
        }
    }

    #[test]
    fn test_short_debug_flag() {
        let cli = Cli::try_parse_from(["scm-onboarder", "-X", "version"]).unwrap();
        assert!(cli.debug);
    }

    #[test]
    fn test_import_flags() {
        let cli = Cli::try_parse_from([
            "scm-onboarder",
            "import",
            "--org-name",
            "Engineering",
            "--hyphenate-spaces",
            "--no-scm-refresh",
            "--yes",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Import(args) => {
                assert_eq!(args.org_name.as_deref(), Some("Engineering"));
                assert!(args.hyphenate_spaces);
                assert!(args.no_scm_refresh);
                assert!(args.yes);
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("expected import, got {:?}", other),
        }
    }
}
