//! Batch renderer for astronomical light curve tables.
//!
//! This crate converts directories of comma-delimited light curve tables
//! (timestamp/flux pairs) into borderless PNG scatter plots, one image per
//! table:
//! - Scanning an input directory for data tables
//! - Parsing rows into aligned time/flux sequences, dropping missing-value
//!   and header rows
//! - Rendering each table as an unconnected point scatter with all axes and
//!   labels suppressed
//!
//! # Example
//!
//! ```no_run
//! use lightcurve_plotter::processors::batch::convert_directory;
//! use lightcurve_plotter::PipelineConfig;
//! use std::path::Path;
//!
//! let config = PipelineConfig::default();
//! let summary = convert_directory(Path::new("tables"), Path::new("images"), &config).unwrap();
//! println!("{} rendered, {} failed", summary.rendered(), summary.failed());
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod processors;
pub mod visualization;

pub use crate::config::{BatchConfig, ExtensionsConfig, MarkerStyle, PipelineConfig, PlotConfig};
pub use crate::core::loaders::LightCurve;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
