//! Course Catalogue Crawler CLI
//!
//! Local execution entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use catalogue_crawler::{
    error::Result,
    models::{Config, CourseRef},
    pipeline,
    storage::LocalStorage,
    utils::{http::HttpFetcher, url},
};

/// Course Catalogue Crawler
#[derive(Parser, Debug)]
#[command(
    name = "catalogue-crawler",
    version,
    about = "Crawls a university course catalogue into JSON and CSV"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Defaults to `run`
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run full pipeline: Listing → Details → CSV
    Run(RunArgs),

    /// Collect course links only and write the course ids file
    Links(RunArgs),

    /// Rebuild the CSV from an existing details JSON file
    Export {
        /// Directory holding the details JSON (overrides output.dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate configuration and print the effective URLs
    Validate,
}

/// Overrides applied on top of the configuration file.
#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Output directory (overrides output.dir)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of listing pages to walk (overrides catalogue.max_pages)
    #[arg(long)]
    max_pages: Option<u32>,

    /// Pause between requests in milliseconds (overrides crawler.request_delay_ms)
    #[arg(long)]
    delay_ms: Option<u64>,
}

impl RunArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.output {
            config.output.dir = dir.display().to_string();
        }
        if let Some(pages) = self.max_pages {
            config.catalogue.max_pages = pages;
        }
        if let Some(delay) = self.delay_ms {
            config.crawler.request_delay_ms = delay;
        }
    }
}

/// Initialize logging at the given default level.
fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = Config::load(&cli.config);
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        loaded
            .as_ref()
            .map(|c| c.logging.level.as_str())
            .unwrap_or("info")
    };
    init_logging(level);

    let config = loaded.unwrap_or_else(|e| {
        log::warn!(
            "Config load failed from {}: {}. Using defaults.",
            cli.config.display(),
            e
        );
        Config::default()
    });

    match execute(cli.command.unwrap_or(Command::Run(RunArgs::default())), config).await {
        Ok(()) => {
            log::info!("Done!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("An error occurred during the crawl: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn execute(command: Command, mut config: Config) -> Result<()> {
    match command {
        Command::Run(args) => {
            args.apply(&mut config);
            config.validate()?;

            let fetcher = HttpFetcher::from_config(&config.crawler)?;
            let storage = LocalStorage::new(config.output.dir_path());
            pipeline::run_pipeline(&config, &fetcher, &storage).await?;
        }

        Command::Links(args) => {
            args.apply(&mut config);
            config.validate()?;

            let fetcher = HttpFetcher::from_config(&config.crawler)?;
            let storage = LocalStorage::new(config.output.dir_path());
            pipeline::run_listing(&config, &fetcher, &storage).await?;
        }

        Command::Export { output } => {
            if let Some(dir) = output {
                config.output.dir = dir.display().to_string();
            }
            config.validate()?;

            let storage = LocalStorage::new(config.output.dir_path());
            pipeline::run_export(&config, &storage).await?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");

            log::info!(
                "Listing page 1: {}",
                url::listing_url(&config.catalogue, 1)?
            );
            let sample = CourseRef::new(config.catalogue.catalogue_id.clone(), "COID");
            log::info!(
                "Detail fragment: {}",
                url::detail_url(&config.catalogue.base_url, &sample)?
            );
            log::info!("Output directory: {}", config.output.dir);
        }
    }

    Ok(())
}
