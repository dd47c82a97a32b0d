//! Configuration types for the light curve plotter.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Marker glyph used for each plotted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStyle {
    /// A `+` cross
    #[default]
    Cross,
    /// A filled circle
    Circle,
    /// A filled triangle
    Triangle,
}

/// Configuration for scatter plot rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Marker glyph for plotted records
    #[serde(default)]
    pub marker: MarkerStyle,

    /// Output resolution in dots per inch
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// Marker size in pixels
    #[serde(default = "default_marker_size")]
    pub marker_size: u32,
}

fn default_dpi() -> u32 {
    300
}

fn default_marker_size() -> u32 {
    6
}

impl PlotConfig {
    /// Pixel dimensions of the output image for the configured DPI.
    ///
    /// The canvas is 6.4 in x 4.8 in, so the default 300 DPI yields
    /// a 1920x1440 image.
    pub fn image_dimensions(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        ((6.4 * dpi).round() as u32, (4.8 * dpi).round() as u32)
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            marker: MarkerStyle::default(),
            dpi: default_dpi(),
            marker_size: default_marker_size(),
        }
    }
}

/// File extensions for data tables and rendered images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionsConfig {
    /// Extension of input data tables (without the dot)
    #[serde(default = "default_data_extension")]
    pub data: String,

    /// Extension of output images (without the dot)
    #[serde(default = "default_image_extension")]
    pub image: String,
}

fn default_data_extension() -> String {
    "tbl".to_string()
}

fn default_image_extension() -> String {
    "png".to_string()
}

impl Default for ExtensionsConfig {
    fn default() -> Self {
        Self {
            data: default_data_extension(),
            image: default_image_extension(),
        }
    }
}

/// Configuration for batch processing behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Render files in parallel across worker threads
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Abort the batch on the first failed file
    #[serde(default)]
    pub fail_fast: bool,
}

fn default_parallel() -> bool {
    true
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            fail_fast: false,
        }
    }
}

/// Main pipeline configuration combining all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub plot: PlotConfig,

    #[serde(default)]
    pub extensions: ExtensionsConfig,

    #[serde(default)]
    pub batch: BatchConfig,
}

impl PipelineConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: PipelineConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_plot_config() {
        let config = PlotConfig::default();
        assert_eq!(config.marker, MarkerStyle::Cross);
        assert_eq!(config.dpi, 300);
        assert_eq!(config.image_dimensions(), (1920, 1440));
    }

    #[test]
    fn test_default_pipeline_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.extensions.data, "tbl");
        assert_eq!(config.extensions.image, "png");
        assert!(config.batch.parallel);
        assert!(!config.batch.fail_fast);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: PipelineConfig = serde_yaml::from_str("plot:\n  dpi: 100\n").unwrap();
        assert_eq!(config.plot.dpi, 100);
        assert_eq!(config.plot.marker, MarkerStyle::Cross);
        assert_eq!(config.extensions.data, "tbl");
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let mut config = PipelineConfig::default();
        config.plot.marker = MarkerStyle::Circle;
        config.plot.dpi = 150;
        config.batch.parallel = false;

        config.to_yaml(&path).unwrap();
        let loaded = PipelineConfig::from_yaml(&path).unwrap();

        assert_eq!(loaded.plot.marker, MarkerStyle::Circle);
        assert_eq!(loaded.plot.dpi, 150);
        assert!(!loaded.batch.parallel);
    }
}
