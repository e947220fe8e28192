//! Command-line flags. Anything given here overrides the config file.

use anyhow::{Context, Result};
use clap::Parser;
use starlane_physics::WorldConfig;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "starlane", about = "Run a Starlane sector without a renderer")]
pub struct Cli {
    /// JSON world config; missing fields take their defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of ticks to run before exiting.
    #[arg(long, default_value_t = 500)]
    pub ticks: u64,

    #[arg(long)]
    pub half_width: Option<f32>,

    #[arg(long)]
    pub tick_rate: Option<f32>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Pace ticks against the wall clock instead of running flat out.
    #[arg(long)]
    pub realtime: bool,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Load the config file (if any) and apply the flag overrides.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed, or if the final config
    /// does not validate.
    pub fn world_config(&self) -> Result<WorldConfig> {
        let mut config = match &self.config {
            Some(path) => WorldConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
            None => WorldConfig::default(),
        };
        if let Some(half_width) = self.half_width {
            config.half_width = half_width;
        }
        if let Some(tick_rate) = self.tick_rate {
            config.tick_rate = tick_rate;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.validate().context("invalid world config")?;
        Ok(config)
    }
}
