//! Pricebreak CLI
//!
//! Loads a product catalog and cart fixture set, prices the cart and prints the
//! order summary.

use std::io;

use anyhow::Result;
use tracing::info;

use pricebreak::{config::Config, fixtures::Fixture, receipt::Receipt, summary::aggregate_cart};

/// Pricebreak CLI entry point
pub fn main() -> Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter()?)
        .with_writer(io::stderr)
        .init();

    info!(
        fixture = %config.fixture,
        dir = %config.fixtures_dir.display(),
        "loading fixture set"
    );

    let fixture = Fixture::from_set_in(&config.fixtures_dir, &config.fixture)?;
    let cart = fixture.cart()?;
    let summary = aggregate_cart(&cart)?;

    info!(lines = cart.len(), total = %summary.total, "cart priced");

    let stdout = io::stdout();
    let handle = stdout.lock();

    Receipt::new(&cart, summary)?.write_to(handle)?;

    Ok(())
}
