//! Import command implementation

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use super::context::ImportSettings;
use super::prompt::{self, DialoguerPrompter};
use super::{ImportArgs, OutputFormat};
use crate::client::LifecycleClient;
use crate::config::Config;
use crate::error::Result;
use crate::hierarchy::render_tree;
use crate::output;
use crate::reconcile::{EntityCache, Reconciler, RunContext, find_target_organization};
use crate::sanitize::Sanitizer;
use crate::scm::{AzureDevOpsProvider, ScmKind, ScmProvider};

const CONFIRM_PROMPT: &str = "Continue to create Organizations and Applications in Sonatype Lifecycle?";

fn print_banner() {
    let rule = "⬢⬡".repeat(21);
    eprintln!("{}", rule.cyan());
    eprintln!();
    eprintln!("  {}", "Sonatype Lifecycle Bulk SCM Onboarder".bold());
    eprintln!(
        "  Running on: {}/{}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    eprintln!("  Version:    {}", env!("CARGO_PKG_VERSION"));
    eprintln!();
    eprintln!("{}", rule.cyan());
    eprintln!();
}

fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn build_provider(settings: &ImportSettings) -> Result<Box<dyn ScmProvider>> {
    match settings.scm {
        ScmKind::Azure => Ok(Box::new(AzureDevOpsProvider::with_hosts(
            &settings.scm_token,
            settings.azure_profile_host.as_deref(),
            settings.azure_api_host.as_deref(),
        )?)),
    }
}

/// Run the import command
pub async fn run(args: &ImportArgs, config_path: Option<&str>) -> Result<()> {
    let config = Config::load_at(config_path)?;
    let settings = ImportSettings::resolve(args, &config, &DialoguerPrompter)?;
    debug!("Resolved settings: {:?}", settings);

    print_banner();

    let ctx = RunContext::new(Sanitizer::new(settings.whitespace))
        .with_refresh_existing_scm(settings.refresh_existing_scm)
        .with_max_create_attempts(settings.max_create_attempts);
    debug!("Whitespace policy: {:?}", ctx.sanitizer.whitespace_policy());

    let client = LifecycleClient::new(
        &settings.url,
        &settings.username,
        &settings.password,
        settings.requests_per_second,
    )?;
    debug!("Connecting to Sonatype Lifecycle at {}", client.base_url());

    let mut cache = EntityCache::new();
    cache.initialize(&client).await?;

    let target = find_target_organization(&client, &settings.target_organization).await?;
    eprintln!(
        "Target Organization in Sonatype: {} ({})",
        target.name.bold(),
        target.id
    );
    eprintln!();

    let provider = build_provider(&settings)?;
    let spinner = create_spinner(&format!(
        "Loading from {}...",
        provider.kind().display_name()
    ));
    let discovered = provider.discover_hierarchy().await;
    spinner.finish_and_clear();
    let hierarchy = discovered?;

    if hierarchy.is_empty() {
        eprintln!("{}", "Nothing found to import.".yellow());
        return Ok(());
    }

    let tree = render_tree(&hierarchy, &ctx.sanitizer);
    let totals = format!(
        "{} organizations, {} applications",
        hierarchy.organization_count(),
        hierarchy.application_count()
    );

    if args.dry_run {
        match args.format {
            OutputFormat::Json => println!("{}", output::json::format_json(&hierarchy)?),
            OutputFormat::Pretty => {
                print!("{}", tree);
                println!("{}", totals);
            }
        }
        eprintln!("{}", "Dry run: no changes made.".yellow());
        return Ok(());
    }

    eprint!("{}", tree);
    eprintln!("{}", totals);
    eprintln!();

    if !args.yes && !prompt::confirm(CONFIRM_PROMPT)? {
        eprintln!("Cancelled.");
        return Ok(());
    }

    eprintln!("Creating Organizations and Applications in Sonatype Lifecycle. Please wait...");
    let summary = Reconciler::new(&client, &mut cache, &ctx)
        .apply(&hierarchy, &target, &provider.scm_config())
        .await?;

    output::print(&summary, args.format)?;
    eprintln!("{} Done", "✓".green());

    Ok(())
}
