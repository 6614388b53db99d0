use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use depsweep::{
    config::Config,
    feed::{FeedSource, PatternSource, StaticSource},
    model::CheckMode,
    output::{print_report, OutputFormat},
    scanner::SCANNED_EXTENSIONS,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Exit codes for CI integration
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
    pub const MATCHES_FOUND: u8 = 2;
}

#[derive(Parser)]
#[command(name = "depsweep")]
#[command(
    author,
    version,
    about = "Scan a project tree for references to known-compromised packages"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a project directory
    Scan {
        /// Project directory to scan
        dir: PathBuf,

        /// Package names to search for (default: fetched from the feed)
        patterns: Vec<String>,

        /// Check mode (shallow: lock files only, exhaustive: all text files)
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Output format (table, json)
        #[arg(short, long)]
        format: Option<String>,

        /// Write the JSON report to a file
        #[arg(short, long)]
        output: Option<String>,

        /// Override the compromised-package feed URL
        #[arg(long)]
        feed_url: Option<String>,

        /// Exit with code 2 if any match is found
        #[arg(long)]
        fail_on_match: bool,
    },

    /// List recognized lock files, extensions, and exclusions
    ListTargets,

    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Shallow,
    Exhaustive,
}

impl From<ModeArg> for CheckMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Shallow => CheckMode::Shallow,
            ModeArg::Exhaustive => CheckMode::Exhaustive,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

async fn run() -> Result<u8> {
    let cli = Cli::parse();
    // A missing config file falls back to defaults inside load(); an
    // unreadable or malformed one is fatal, so a typo'd ignore list
    // cannot silently stop suppressing.
    let config = Config::load()?;

    match cli.command {
        Commands::Scan {
            dir,
            patterns,
            mode,
            format,
            output,
            feed_url,
            fail_on_match,
        } => {
            let format_str = format.unwrap_or_else(|| config.default_format.clone());
            let mode = match mode {
                Some(mode) => mode.into(),
                None => parse_mode(&config.default_mode)?,
            };

            run_scan(
                dir,
                patterns,
                mode,
                format_str,
                output,
                feed_url,
                fail_on_match,
                &config,
            )
            .await
        }
        Commands::ListTargets => {
            list_targets();
            Ok(exit_codes::SUCCESS)
        }
        Commands::Config { init, path } => {
            handle_config(init, path)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_scan(
    dir: PathBuf,
    cli_patterns: Vec<String>,
    mode: CheckMode,
    format: String,
    output_file: Option<String>,
    feed_url: Option<String>,
    fail_on_match: bool,
    config: &Config,
) -> Result<u8> {
    let format = OutputFormat::from_str(&format).map_err(|e| anyhow::anyhow!(e))?;
    let is_interactive = format == OutputFormat::Table && output_file.is_none();

    // Explicit patterns win; otherwise pull the published feed.
    let source: Box<dyn PatternSource> = if cli_patterns.is_empty() {
        let url = feed_url.unwrap_or_else(|| config.feed_url.clone());
        Box::new(FeedSource::new(url))
    } else {
        Box::new(StaticSource::new(cli_patterns))
    };

    let fetch_progress = spinner(is_interactive, "Loading compromised package list...");
    let patterns: Vec<String> = source
        .fetch()
        .await?
        .into_iter()
        .filter(|p| !config.ignore.should_ignore(p))
        .collect();
    if let Some(pb) = fetch_progress {
        pb.finish_with_message(format!(
            "Loaded {} patterns from {}",
            patterns.len(),
            source.name()
        ));
    }

    let scan_progress = spinner(is_interactive, format!("Running {} scan...", mode));
    let report = depsweep::scan(&dir, &patterns, mode)?;
    if let Some(pb) = scan_progress {
        pb.finish_with_message(format!("Found {} match(es)", report.outcome.len()));
    }

    if let Some(path) = output_file {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&path, json)?;
        println!("Results written to: {}", path);
    } else {
        print_report(&report, format)?;
    }

    if fail_on_match && !report.outcome.is_empty() {
        Ok(exit_codes::MATCHES_FOUND)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

fn spinner(is_interactive: bool, message: impl Into<String>) -> Option<ProgressBar> {
    if !is_interactive {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.into());
    Some(pb)
}

fn list_targets() {
    println!("Lock files checked in shallow mode:");
    println!();
    let lock_files = [
        ("package-lock.json", "npm", "supported"),
        ("yarn.lock", "yarn", "supported"),
        ("pnpm-lock.yaml", "pnpm", "supported"),
        ("bun.lockb", "bun", "unsupported (binary format)"),
    ];
    for (name, manager, support) in lock_files {
        println!("  {:<20} {:<6} [{}]", name, manager, support);
    }

    println!();
    println!("File extensions checked in exhaustive mode:");
    println!();
    let extensions: Vec<String> = SCANNED_EXTENSIONS.iter().map(|e| format!(".{}", e)).collect();
    println!("  {}", extensions.join(", "));

    println!();
    println!("Always excluded:");
    println!();
    println!("  node_modules/ and any entry whose name starts with '.'");
}

fn handle_config(init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        let config = Config::default();
        config.save()?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
        return Ok(());
    }

    // Show current config
    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'depsweep config --init' to create one.");
        println!();
        println!("Config path: {}", config_path.display());
    }

    Ok(())
}

fn parse_mode(s: &str) -> Result<CheckMode> {
    match s.to_lowercase().as_str() {
        "shallow" => Ok(CheckMode::Shallow),
        "exhaustive" => Ok(CheckMode::Exhaustive),
        other => Err(anyhow::anyhow!(
            "Unknown mode: {}. Use: shallow, exhaustive",
            other
        )),
    }
}
