use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tracing::debug;
use trichrome_core::align::MetricKind;
use trichrome_core::filters::EnhanceConfig;
use trichrome_core::pipeline::{AlignConfig, AlignMode};

#[derive(Clone, Copy, ValueEnum)]
pub enum MetricArg {
    Ncc,
    Ssd,
}

impl From<MetricArg> for MetricKind {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Ncc => MetricKind::Ncc,
            MetricArg::Ssd => MetricKind::Ssd,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Pyramid,
    Flat,
}

impl From<ModeArg> for AlignMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Pyramid => AlignMode::Pyramid,
            ModeArg::Flat => AlignMode::Flat,
        }
    }
}

/// Alignment options shared by `align` and `batch`.
#[derive(Args)]
pub struct AlignOptions {
    /// TOML config file; command-line flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Similarity metric
    #[arg(long, value_enum)]
    pub metric: Option<MetricArg>,

    /// Search strategy
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Base search radius in pixels (default: chosen from the plate size)
    #[arg(long)]
    pub search: Option<usize>,

    /// Deepest pyramid level (default: chosen from the plate size)
    #[arg(long)]
    pub depth: Option<usize>,

    /// Margin cropped from each side of each third, in percent
    #[arg(long)]
    pub crop: Option<f32>,

    /// Keep the dark borders of the composite
    #[arg(long)]
    pub no_border_crop: bool,

    /// Apply contrast, gamma, sharpen and saturation enhancement
    #[arg(long)]
    pub enhance: bool,

    /// Output format extension (jpg, png, tiff)
    #[arg(long)]
    pub format: Option<String>,

    /// Output directory
    #[arg(short, long, default_value = "results")]
    pub output: PathBuf,
}

impl AlignOptions {
    /// Build the effective config: file (or defaults), then flag overrides.
    pub fn to_config(&self) -> Result<AlignConfig> {
        let mut config = match self.config {
            Some(ref path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                toml::from_str::<AlignConfig>(&text)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => AlignConfig::default(),
        };

        if let Some(metric) = self.metric {
            config.metric = metric.into();
        }
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if self.search.is_some() {
            config.search_radius = self.search;
        }
        if self.depth.is_some() {
            config.max_depth = self.depth;
        }
        if self.crop.is_some() {
            config.crop_percent = self.crop;
        }
        if self.no_border_crop {
            config.border_crop = None;
        }
        if self.enhance && config.enhance.is_none() {
            config.enhance = Some(EnhanceConfig::default());
        }
        if let Some(ref format) = self.format {
            config.output_extension = format.trim_start_matches('.').to_ascii_lowercase();
        }

        debug!(?config, "Effective alignment config");
        Ok(config)
    }
}
