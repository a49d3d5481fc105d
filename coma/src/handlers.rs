use clap::ArgMatches;
use colored::Colorize;
use coma_core::crawl::{CrawlOptions, FetcherKind, execute_crawl, reporter_callbacks};
use coma_core::print_banner;
use coma_core::report::{OutputFormat, format_summary};
use coma_scanner::ExtractionMode;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

// Helper functions for crawl handler

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // a second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load sub-paths from a newline-delimited wordlist
pub fn load_directories_from_file(path: &Path) -> Result<Vec<String>, String> {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    let content = fs::read_to_string(&expanded)
        .map_err(|e| format!("Failed to read wordlist {}: {}", path.display(), e))?;

    let directories: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    if directories.is_empty() {
        return Err(format!("No sub-paths found in {}", path.display()));
    }

    Ok(directories)
}

/// Positional directories first, then wordlist entries
pub fn collect_directories(
    positional: Vec<String>,
    wordlist: Option<&PathBuf>,
) -> Result<Vec<String>, String> {
    let mut directories = positional;
    if let Some(path) = wordlist {
        directories.extend(load_directories_from_file(path)?);
    }
    Ok(directories)
}

pub fn crawl_options_from_matches(matches: &ArgMatches) -> Result<CrawlOptions, String> {
    let url = matches
        .get_one::<String>("url")
        .cloned()
        .ok_or("A seed URL is required")?;
    let mode = matches
        .get_one::<String>("extract")
        .ok_or("--extract is required")?
        .parse::<ExtractionMode>()?;
    let fetcher = matches
        .get_one::<String>("fetcher")
        .map(|f| f.parse::<FetcherKind>())
        .transpose()?
        .unwrap_or(FetcherKind::Browser);
    let timeout = matches.get_one::<u64>("timeout").copied().unwrap_or(30);

    let positional: Vec<String> = matches
        .get_many::<String>("directories")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let directories = collect_directories(positional, matches.get_one::<PathBuf>("wordlist"))?;

    Ok(CrawlOptions {
        url,
        directories,
        mode,
        fetcher,
        timeout: Duration::from_secs(timeout),
        bound: matches.get_one::<String>("bound").cloned(),
        max_depth: matches.get_one::<usize>("depth").copied(),
    })
}

pub fn output_format_from_matches(matches: &ArgMatches) -> Result<OutputFormat, String> {
    matches
        .get_one::<String>("format")
        .map(|f| f.parse::<OutputFormat>())
        .transpose()
        .map(|format| format.unwrap_or(OutputFormat::Text))
}

pub fn parse_configuration(matches: &ArgMatches) -> Result<(CrawlOptions, OutputFormat), String> {
    let format = output_format_from_matches(matches)?;
    let options = crawl_options_from_matches(matches)?;
    Ok((options, format))
}

pub async fn handle_crawl(matches: &ArgMatches) {
    init_tracing(matches.get_flag("verbose"));
    let quiet = matches.get_flag("quiet");

    // configuration errors surface before any fetch session is opened
    let (options, format) = match parse_configuration(matches) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    let chatty = format == OutputFormat::Text && !quiet;
    if chatty {
        print_banner();
    }

    let (progress_callback, result_callback) = reporter_callbacks(format);
    match execute_crawl(options, Some(progress_callback), Some(result_callback)).await {
        Ok(summary) => {
            info!(
                "Crawl finished: {} pages, {} items",
                summary.visited.len(),
                summary.items_found
            );
            if chatty {
                println!("{}", format_summary(&summary));
            }
        }
        Err(e) => {
            eprintln!("✗ Crawl failed: {}", e);
            std::process::exit(1);
        }
    }
}
