//! Command-line interface for the light curve plotter.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::{MarkerStyle, PipelineConfig};
use crate::core::loaders::load_light_curve;
use crate::processors::batch;
use crate::visualization::render_scatter;

#[derive(Parser)]
#[command(name = "lightcurve-plotter")]
#[command(about = "Light curve scatter plot batch renderer", version)]
pub struct Cli {
    /// Path to YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every data table in a directory to a scatter plot image
    Convert {
        /// Directory containing data tables
        input_dir: PathBuf,
        /// Output directory for images
        output_dir: PathBuf,
        /// Marker glyph for plotted records
        #[arg(long, value_enum)]
        marker: Option<MarkerStyle>,
        /// Output resolution in dots per inch
        #[arg(long)]
        dpi: Option<u32>,
        /// Abort the batch on the first failed file
        #[arg(long)]
        fail_fast: bool,
        /// Process files one at a time instead of in parallel
        #[arg(long)]
        sequential: bool,
    },

    /// Render a single data table
    Plot {
        /// Input data table
        input: PathBuf,
        /// Output image path (defaults to the input name with the image extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Marker glyph for plotted records
        #[arg(long, value_enum)]
        marker: Option<MarkerStyle>,
        /// Output resolution in dots per inch
        #[arg(long)]
        dpi: Option<u32>,
    },
}

/// Create a spinner for indeterminate operations
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print a summary box
fn print_summary(title: &str, items: &[(&str, String)]) {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║ {:<62} ║", title);
    println!("╠══════════════════════════════════════════════════════════════╣");
    for (key, value) in items {
        let display_value = if value.len() > 39 {
            format!("{}...", &value[..36])
        } else {
            value.clone()
        };
        println!("║ {:<20}: {:<39} ║", key, display_value);
    }
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
}

pub fn run() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity (must come first)
    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .format_timestamp_secs()
        .init();

    // Load config
    let config = match &cli.config {
        Some(path) => match PipelineConfig::from_yaml(path) {
            Ok(cfg) => {
                info!("Loaded config from: {}", path.display());
                cfg
            }
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}, using defaults",
                    path.display(),
                    e
                );
                PipelineConfig::default()
            }
        },
        None => PipelineConfig::default(),
    };

    // Dispatch to subcommands
    match cli.command {
        Commands::Convert {
            input_dir,
            output_dir,
            marker,
            dpi,
            fail_fast,
            sequential,
        } => {
            cmd_convert(
                &input_dir, &output_dir, marker, dpi, fail_fast, sequential, &config,
            );
        }
        Commands::Plot {
            input,
            output,
            marker,
            dpi,
        } => {
            cmd_plot(&input, output, marker, dpi, &config);
        }
    }
}

/// Apply CLI overrides on top of the loaded config.
fn effective_config(
    base: &PipelineConfig,
    marker: Option<MarkerStyle>,
    dpi: Option<u32>,
) -> PipelineConfig {
    let mut config = base.clone();
    if let Some(marker) = marker {
        config.plot.marker = marker;
    }
    if let Some(dpi) = dpi {
        config.plot.dpi = dpi;
    }
    config
}

fn cmd_convert(
    input_dir: &Path,
    output_dir: &Path,
    marker: Option<MarkerStyle>,
    dpi: Option<u32>,
    fail_fast: bool,
    sequential: bool,
    config: &PipelineConfig,
) {
    let start = Instant::now();

    let mut config = effective_config(config, marker, dpi);
    if fail_fast {
        config.batch.fail_fast = true;
    }
    if sequential {
        config.batch.parallel = false;
    }

    println!("Rendering light curve tables...");
    println!("Input directory: {}", input_dir.display());
    println!("Output directory: {}", output_dir.display());

    let tasks = match batch::plan_directory(input_dir, output_dir, &config) {
        Ok(tasks) => tasks,
        Err(e) => {
            error!("Batch setup failed: {}", e);
            std::process::exit(1);
        }
    };
    let total = tasks.len();

    let progress = ProgressBar::new(total as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.green} {pos}/{len} {msg}")
            .unwrap(),
    );

    let summary = batch::run_tasks(tasks, &config, |report| {
        progress.set_message(
            report
                .input
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );
        progress.inc(1);
    });

    progress.finish_and_clear();

    print_summary(
        "Batch Render Complete",
        &[
            ("Input directory", input_dir.display().to_string()),
            ("Output directory", output_dir.display().to_string()),
            ("Tables found", total.to_string()),
            ("Rendered", summary.rendered().to_string()),
            ("Failed", summary.failed().to_string()),
            ("Duration", format!("{:.2?}", start.elapsed())),
        ],
    );

    if !summary.is_clean() {
        std::process::exit(1);
    }
}

fn cmd_plot(
    input: &Path,
    output: Option<PathBuf>,
    marker: Option<MarkerStyle>,
    dpi: Option<u32>,
    config: &PipelineConfig,
) {
    let start = Instant::now();

    let config = effective_config(config, marker, dpi);

    // Default output path to the input name with the image extension
    let output_path = output.unwrap_or_else(|| {
        let mut path = input.to_path_buf();
        path.set_extension(&config.extensions.image);
        path
    });

    println!("Rendering light curve...");
    println!("Input: {}", input.display());
    println!("Output: {}", output_path.display());

    let spinner = create_spinner("Loading table...");

    let curve = match load_light_curve(input) {
        Ok(c) => c,
        Err(e) => {
            spinner.finish_and_clear();
            error!("Failed to load table: {}", e);
            std::process::exit(1);
        }
    };

    spinner.set_message("Rendering plot...");

    match render_scatter(&curve, &output_path, &config.plot) {
        Ok(()) => {
            spinner.finish_and_clear();

            print_summary(
                "Render Complete",
                &[
                    ("Input file", input.display().to_string()),
                    ("Output PNG", output_path.display().to_string()),
                    ("Records", curve.len().to_string()),
                    ("DPI", config.plot.dpi.to_string()),
                    ("Duration", format!("{:.2?}", start.elapsed())),
                ],
            );
        }
        Err(e) => {
            spinner.finish_and_clear();
            error!("Render failed: {}", e);
            std::process::exit(1);
        }
    }
}
