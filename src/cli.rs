//! CLI parsing and orchestration. Validates the input path, sets up the catalog lookup,
//! runs the conversion, and maps errors to exit codes.

use crate::catalog::{
    CatalogClient, CatalogError, HttpCatalog, SearchOptions, DEFAULT_MAX_PAGES, GAMES_API_ENV,
};
use crate::config::{self, Config};
use crate::convert::{convert_file, ConvertError, ConvertOptions};
use crate::progress::Progress;
use crate::providers::{Provider, ProviderTable};
use crate::record::CatalogLookup;
use clap::Parser;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// CLI error carrying exit code and message.
#[derive(Debug, Error)]
pub enum CliRunError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Convert(#[from] ConvertError),
}

impl CliRunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliRunError::InvalidInput(_) | CliRunError::NotFound(_) => 1,
            CliRunError::Convert(ConvertError::Write(_)) => 3,
            CliRunError::Convert(_) => 2,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "slotdoc")]
#[command(about = "Convert a slot game HTML write-up into a YAML game record")]
#[command(
    after_help = "The catalog endpoint comes from --games-api, the GAMES_API environment variable, or games_api in slotdoc.toml. Config file keys (games_api, skip_catalog, max_pages, user_agent, request_delay_secs, timeout_secs, retry_count, retry_backoff_secs, [[providers]]) are documented in the README. CLI flags override config."
)]
pub struct Args {
    /// Game write-up (.html or .htm).
    pub file: PathBuf,

    /// Output path. Default: <input dir>/<game-name-slug>.yml.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not query the games catalog; serverId and gameKey are generated.
    #[arg(long)]
    pub skip_catalog: bool,

    /// Games catalog endpoint (overrides GAMES_API and config).
    #[arg(long)]
    pub games_api: Option<String>,

    /// Maximum catalog pages to search (overrides config; default 200).
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// HTTP User-Agent (overrides config).
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Delay between catalog requests in seconds (overrides config; default 0).
    #[arg(long)]
    pub delay: Option<u64>,

    /// Request timeout in seconds (overrides config; default 30).
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Suppress progress output (errors only).
    #[arg(short, long)]
    pub quiet: bool,

    /// Print debug logs and the error cause chain.
    #[arg(long)]
    pub verbose: bool,
}

/// Log filter used when RUST_LOG is unset.
fn default_filter(args: &Args) -> &'static str {
    if args.quiet {
        "error"
    } else if args.verbose {
        "slotdoc=debug"
    } else {
        "warn"
    }
}

/// Install the stderr log subscriber. RUST_LOG overrides the level chosen from flags.
pub fn init_logging(args: &Args) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(args).into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn validate_input(path: &Path) -> Result<(), CliRunError> {
    let is_html = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == "html" || e == "htm");
    if !is_html {
        return Err(CliRunError::InvalidInput(format!(
            "Please provide a path to an HTML file (.html or .htm), got: {}",
            path.display()
        )));
    }
    if !path.exists() {
        return Err(CliRunError::NotFound(format!(
            "This file does not exist: {}",
            path.display()
        )));
    }
    Ok(())
}

/// Catalog endpoint: --games-api, then GAMES_API, then config. Blank values count as unset.
fn catalog_endpoint(
    flag: Option<&str>,
    env: Option<&str>,
    config: Option<&Config>,
) -> Option<String> {
    [flag, env, config.and_then(|c| c.games_api.as_deref())]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(String::from)
}

fn build_client(args: &Args, config: Option<&Config>) -> Result<CatalogClient, CatalogError> {
    let mut builder = CatalogClient::builder();
    if let Some(delay) = args.delay.or_else(|| config.and_then(|c| c.request_delay_secs)) {
        builder = builder.delay_secs(delay);
    }
    if let Some(timeout) = args.timeout.or_else(|| config.and_then(|c| c.timeout_secs)) {
        builder = builder.timeout_secs(timeout);
    }
    if let Some(n) = config.and_then(|c| c.retry_count) {
        builder = builder.retry_count(n);
    }
    if let Some(backoff) = config.and_then(|c| c.retry_backoff_secs.clone()) {
        builder = builder.retry_backoff_secs(backoff);
    }
    if let Some(ua) = args
        .user_agent
        .clone()
        .or_else(|| config.and_then(|c| c.user_agent.clone()))
    {
        builder = builder.user_agent(ua);
    }
    builder.build().map_err(CatalogError::Client)
}

/// HTTP catalog at `endpoint`. Failures here disable the lookup, not the conversion.
fn open_catalog(
    endpoint: &str,
    args: &Args,
    config: Option<&Config>,
) -> Result<HttpCatalog, CatalogError> {
    HttpCatalog::new(endpoint, build_client(args, config)?)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Terminal rendering of progress events: status lines plus a spinner while paging.
struct StatusLines {
    spinner: RefCell<Option<indicatif::ProgressBar>>,
}

impl StatusLines {
    fn new() -> Self {
        Self {
            spinner: RefCell::new(None),
        }
    }

    fn line(&self, msg: String) {
        match self.spinner.borrow().as_ref() {
            Some(pb) => pb.println(msg),
            None => eprintln!("{}", msg),
        }
    }

    fn finish_spinner(&self) {
        if let Some(pb) = self.spinner.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }

    fn on_event(&self, event: &Progress<'_>) {
        match event {
            Progress::Reading(path) => self.line(format!("Reading file {}", file_name(path))),
            Progress::Parsing => self.line("Parsing file".to_string()),
            Progress::Searching { game, location } => {
                self.line(format!("Searching for {} game in {}", game, location))
            }
            Progress::CheckingPage(page) => {
                let mut state = self.spinner.borrow_mut();
                let pb = state.get_or_insert_with(|| {
                    let bar = indicatif::ProgressBar::new_spinner();
                    if let Ok(style) = indicatif::ProgressStyle::default_spinner()
                        .template("{spinner} {msg} ({elapsed})")
                    {
                        bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
                    }
                    bar.enable_steady_tick(Duration::from_millis(80));
                    bar
                });
                pb.set_message(format!("Checking page {}...", page));
            }
            Progress::NoProviderGames { provider } => {
                self.finish_spinner();
                self.line(format!(" WARNING  No games of {} were found", provider));
            }
            Progress::Found(name) => {
                self.finish_spinner();
                self.line(format!(" FOUND  {}", name));
            }
            Progress::NotFound => {
                self.finish_spinner();
                self.line(
                    " NOT FOUND  serverId and gameKey for this game will be generated automatically"
                        .to_string(),
                );
            }
            Progress::PageLimit(pages) => {
                self.finish_spinner();
                self.line(format!(
                    " NOT FOUND  stopped after {} pages; serverId and gameKey will be generated automatically",
                    pages
                ));
            }
            Progress::Writing(path) => {
                self.finish_spinner();
                self.line(format!("Writing file {}", file_name(path)));
            }
        }
    }
}

/// Entry point for the CLI. Returns Ok(()) on success; Err with exit code and message on failure.
pub fn run(args: &Args) -> Result<(), CliRunError> {
    validate_input(&args.file)?;

    let mut config = config::load_config().map_err(CliRunError::InvalidInput)?;
    let extra_providers = config
        .as_mut()
        .map(|c| std::mem::take(&mut c.providers))
        .unwrap_or_default();
    let providers = ProviderTable::with_extra(extra_providers.into_iter().map(Provider::from));
    let config = config.as_ref();

    let status = StatusLines::new();
    let on_progress = |event: &Progress<'_>| status.on_event(event);
    let progress: Option<&dyn Fn(&Progress<'_>)> = if args.quiet {
        None
    } else {
        Some(&on_progress)
    };

    let skip = args.skip_catalog || config.and_then(|c| c.skip_catalog).unwrap_or(false);
    let max_pages = args
        .max_pages
        .or_else(|| config.and_then(|c| c.max_pages))
        .unwrap_or(DEFAULT_MAX_PAGES);
    let env_endpoint = std::env::var(GAMES_API_ENV).ok();

    let mut http_catalog = None;
    let catalog = if skip {
        CatalogLookup::Skip
    } else {
        match catalog_endpoint(args.games_api.as_deref(), env_endpoint.as_deref(), config) {
            None => CatalogLookup::Unavailable(CatalogError::MissingEndpoint),
            Some(endpoint) => match open_catalog(&endpoint, args, config) {
                Ok(c) => CatalogLookup::Search {
                    source: http_catalog.insert(c),
                    options: SearchOptions {
                        max_pages,
                        progress,
                    },
                },
                Err(e) => CatalogLookup::Unavailable(e),
            },
        }
    };

    let result = convert_file(
        &args.file,
        ConvertOptions {
            providers: &providers,
            catalog,
            output: args.output.clone(),
            progress,
        },
    );
    status.finish_spinner();
    let converted = result?;

    if !args.quiet {
        eprintln!(" DONE  Wrote {}", converted.path.display());
    }
    Ok(())
}
