//! CLI configuration

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, filter::ParseError};

/// Price a cart fixture and print its order summary
#[derive(Debug, Parser)]
#[command(name = "pricebreak", about = "Tiered cart pricing", long_about = None)]
pub struct Config {
    /// Fixture set to load products and cart from
    #[arg(short, long, default_value = "workshop")]
    pub fixture: String,

    /// Directory containing `products/` and `carts/` fixture files
    #[arg(short = 'd', long, env = "PRICEBREAK_FIXTURES", default_value = "./fixtures")]
    pub fixtures_dir: PathBuf,

    /// Log filter directives (e.g. `info` or `pricebreak=debug`)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Build the tracing filter from `log_level`, which already covers `RUST_LOG`
    ///
    /// # Errors
    ///
    /// Returns an error if the directives cannot be parsed
    pub fn env_filter(&self) -> Result<EnvFilter, ParseError> {
        EnvFilter::try_new(&self.log_level)
    }
}
