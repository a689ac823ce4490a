//! Command line configuration

use std::path::PathBuf;

use clap::Parser;

use crate::{
    fixtures::{Fixture, FixtureError},
    logging::LogFormat,
};

/// Bag count CLI configuration
#[derive(Debug, Parser)]
#[command(name = "bagcount", about = "Seed bag counts for kilogram orders", long_about = None)]
pub struct ReportArgs {
    /// YAML order set with `orders` and `bag_sizes`
    #[arg(short, long, env = "BAGCOUNT_FIXTURE", conflicts_with_all = ["orders", "sizes"])]
    pub fixture: Option<PathBuf>,

    /// Orders in kilograms, comma separated
    #[arg(
        short,
        long,
        env = "BAGCOUNT_ORDERS",
        value_delimiter = ',',
        allow_negative_numbers = true
    )]
    pub orders: Vec<f64>,

    /// Available bag sizes in kilograms, comma separated
    #[arg(
        short,
        long,
        env = "BAGCOUNT_SIZES",
        value_delimiter = ',',
        allow_negative_numbers = true
    )]
    pub sizes: Vec<i64>,

    /// Also print how each order was packed
    #[arg(long)]
    pub per_order: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "BAGCOUNT_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl ReportArgs {
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

    /// The order set to report on, from the fixture file or the inline lists.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the fixture file cannot be loaded.
    pub fn order_set(&self) -> Result<Fixture, FixtureError> {
        match &self.fixture {
            Some(path) => Fixture::from_path(path),
            None => Ok(Fixture::new(self.orders.clone(), self.sizes.clone())),
        }
    }
}
