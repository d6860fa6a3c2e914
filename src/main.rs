use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use textcloud::app::{App, AppOptions};
use textcloud::config::{DEFAULT_HEIGHT, DEFAULT_SAMPLE_DIRECTORY, DEFAULT_WIDTH};
use textcloud::Config;

/// Interactive word-cloud generator.
#[derive(Parser)]
#[command(name = "textcloud", version, about)]
struct Cli {
    /// Directory holding the sample text files
    #[arg(long, default_value = DEFAULT_SAMPLE_DIRECTORY)]
    samples_dir: PathBuf,

    /// TTF font to render with (defaults to a well-known system font)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// Output scale factor
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// RNG seed for reproducible layout and colors
    #[arg(long)]
    seed: Option<u64>,

    /// Extra stop word to exclude from counting (repeatable)
    #[arg(long = "stop-word", value_name = "WORD")]
    stop_words: Vec<String>,

    /// Default stop word to allow again (repeatable)
    #[arg(long = "allow-word", value_name = "WORD")]
    allow_words: Vec<String>,

    /// Verbose diagnostics on stderr
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {e:#}", "error:".red().bold());
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "textcloud=debug"
    } else {
        "textcloud=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::default();
    config.sample_directory = cli.samples_dir;
    config.width = cli.width;
    config.height = cli.height;
    config.add_stop_words(&cli.stop_words);
    config.remove_stop_words(&cli.allow_words);

    let options = AppOptions {
        font_path: cli.font,
        rng_seed: cli.seed,
        scale: cli.scale,
    };

    App::new(config, options).run()
}
