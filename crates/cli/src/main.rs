mod settings;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use export::WorkbookExporter;
use listings::UserProfile;
use orchestrator::{LeadOrchestrator, RunOptions, RunSummary};
use outreach::{ChatClient, CoverLetterGenerator};
use pipeline::JobFilterEngine;
use settings::{Settings, check_max_pages};
use sources::{JobCache, MarketplaceSpider};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Scraped listings are cached here, relative to the output directory.
const CACHE_FILE: &str = "scraped_jobs.json";

/// Conventional exit status after SIGINT.
const INTERRUPTED: u8 = 130;

/// GigScout - freelance job scraper and lead qualifier
#[derive(Parser)]
#[command(name = "gig-scout")]
#[command(about = "Scrape freelance job listings, filter them and draft cover letters", long_about = None)]
struct Cli {
    /// Settings file (defaults to ./gig-scout.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape, filter, write cover letters and export
    Run {
        /// Search query
        #[arg(short, long)]
        query: Option<String>,

        /// Maximum result pages to scrape (1-50)
        #[arg(short, long)]
        pages: Option<u32>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        skip_cover_letters: bool,

        /// Print the effective configuration and exit
        #[arg(long)]
        dry_run: bool,

        /// Do not save the raw scrape
        #[arg(long)]
        no_cache: bool,
    },

    /// Re-filter a cached scrape without touching the network
    Filter {
        /// JSON file written by a previous run
        #[arg(long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        skip_cover_letters: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{} {:#}", "✗".red(), e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&settings.log_level, cli.json_logs);

    tokio::select! {
        result = dispatch(cli.command, settings) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{:#}", e);
                eprintln!("{} {:#}", "✗".red(), e);
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted");
            ExitCode::from(INTERRUPTED)
        }
    }
}

/// `RUST_LOG` wins over the configured level. HTTP internals stay at warn.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{},reqwest=warn,hyper=warn,hyper_util=warn",
            log_level.to_lowercase()
        ))
    });

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

async fn dispatch(command: Commands, settings: Settings) -> Result<()> {
    match command {
        Commands::Run {
            query,
            pages,
            output,
            skip_cover_letters,
            dry_run,
            no_cache,
        } => {
            let options = RunOptions {
                query: query.unwrap_or_else(|| settings.search_query.clone()),
                max_pages: check_max_pages(pages.unwrap_or(settings.max_pages))?,
                skip_cover_letters,
                letter_delay: settings.letter_delay(),
                workbook_name: None,
            };
            let output = output.unwrap_or_else(|| settings.output_path.clone());

            handle_run(&settings, options, output, dry_run, no_cache).await
        }
        Commands::Filter {
            input,
            output,
            skip_cover_letters,
        } => {
            let options = RunOptions {
                skip_cover_letters,
                letter_delay: settings.letter_delay(),
                ..Default::default()
            };
            let output = output.unwrap_or_else(|| settings.output_path.clone());

            handle_filter(&settings, options, input, output).await
        }
    }
}

/// Handle the 'run' command
async fn handle_run(
    settings: &Settings,
    options: RunOptions,
    output: PathBuf,
    dry_run: bool,
    no_cache: bool,
) -> Result<()> {
    print_configuration(settings, &options, &output);

    if dry_run {
        info!("Dry run, exiting without action");
        return Ok(());
    }

    let spider = MarketplaceSpider::new(settings.search_url()?)
        .context("Failed to build marketplace client")?;
    let mut orchestrator = build_orchestrator(settings, Arc::new(spider), &output, &options)?;

    if !no_cache {
        orchestrator = orchestrator.with_cache(JobCache::new(output.join(CACHE_FILE)));
    }

    let summary = orchestrator.run(&options).await?;
    print_summary(&summary);
    Ok(())
}

/// Handle the 'filter' command
async fn handle_filter(
    settings: &Settings,
    options: RunOptions,
    input: PathBuf,
    output: PathBuf,
) -> Result<()> {
    if !input.is_file() {
        bail!("Cached jobs not found: {}", input.display());
    }

    let cache = JobCache::new(&input);
    let orchestrator = build_orchestrator(settings, Arc::new(cache), &output, &options)?;
    let summary = orchestrator.run(&options).await?;
    print_summary(&summary);
    Ok(())
}

fn build_orchestrator(
    settings: &Settings,
    source: Arc<dyn sources::JobSource>,
    output: &Path,
    options: &RunOptions,
) -> Result<LeadOrchestrator> {
    let exporter = WorkbookExporter::new(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;
    let engine = JobFilterEngine::new(settings.filters.clone());

    let mut orchestrator = LeadOrchestrator::new(source, engine, exporter);
    if !options.skip_cover_letters {
        if let Some(generator) = build_generator(settings)? {
            orchestrator = orchestrator.with_generator(generator);
        }
    }
    Ok(orchestrator)
}

/// A generator needs both an API key and a readable profile. Either one
/// missing downgrades the run to "no cover letters" with a warning.
fn build_generator(settings: &Settings) -> Result<Option<CoverLetterGenerator>> {
    let provider = settings.provider()?;

    if !settings.has_ai_key() {
        warn!("No {} API key configured, cover letters will be skipped", provider);
        return Ok(None);
    }

    if !settings.profile_path.exists() {
        warn!(
            "Profile not found: {}, cover letters will be skipped",
            settings.profile_path.display()
        );
        return Ok(None);
    }

    let profile = match UserProfile::load(&settings.profile_path) {
        Ok(profile) => profile,
        Err(e) => {
            warn!("Failed to load profile, cover letters will be skipped: {}", e);
            return Ok(None);
        }
    };

    let client = ChatClient::new(
        provider,
        settings.api_key(provider).unwrap_or_default(),
        settings.model(),
    )
    .context("Failed to build chat client")?;
    info!("Cover letters via {} ({})", provider, client.model());

    Ok(Some(CoverLetterGenerator::new(Arc::new(client), profile)))
}

fn print_configuration(settings: &Settings, options: &RunOptions, output: &Path) {
    println!("{}", "GigScout".bold().blue());
    println!("{}Search query: {}", "• ".green(), options.query);
    println!("{}Max pages: {}", "• ".green(), options.max_pages);
    println!("{}Output path: {}", "• ".green(), output.display());
    println!("{}Skip cover letters: {}", "• ".green(), options.skip_cover_letters);
    println!("{}AI provider: {}", "• ".cyan(), settings.ai_provider.to_uppercase());
    println!("{}AI key configured: {}", "• ".cyan(), settings.has_ai_key());
    println!("{}Filters active: {}", "• ".cyan(), settings.filters.has_any_filter());
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("{}", "Pipeline complete".bold().green());
    println!("{}Total jobs scraped: {}", "• ".green(), summary.total_jobs);
    println!("{}Jobs after filtering: {}", "• ".green(), summary.filtered_jobs);
    println!("{}Cover letters generated: {}", "• ".green(), summary.with_cover_letters);

    match &summary.output_path {
        Some(path) => println!("{}Output: {}", "✓".green(), path.display()),
        None => println!("{}Nothing exported", "!".yellow()),
    }
    if !summary.cover_letter_files.is_empty() {
        println!(
            "{}{} cover letter files written",
            "✓".green(),
            summary.cover_letter_files.len()
        );
    }
    println!("Finished in {:.2?}", summary.elapsed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::try_parse_from([
            "gig-scout", "--json-logs", "run", "-q", "rust", "-p", "2", "--dry-run", "--no-cache",
        ])
        .unwrap();

        assert!(cli.json_logs);
        match cli.command {
            Commands::Run { query, pages, dry_run, no_cache, skip_cover_letters, .. } => {
                assert_eq!(query.as_deref(), Some("rust"));
                assert_eq!(pages, Some(2));
                assert!(dry_run && no_cache && !skip_cover_letters);
            }
            Commands::Filter { .. } => panic!("expected run"),
        }
    }

    #[test]
    fn test_filter_requires_input() {
        assert!(Cli::try_parse_from(["gig-scout", "filter"]).is_err());

        let cli = Cli::try_parse_from(["gig-scout", "filter", "--input", "jobs.json", "--config", "x.toml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }
}
