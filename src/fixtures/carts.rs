//! Cart Fixtures

use serde::Deserialize;

/// Wrapper for cart lines in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Cart lines, in the order they were added
    pub items: Vec<CartItemFixture>,
}

/// A single cart line referencing a product by key
#[derive(Debug, Deserialize)]
pub struct CartItemFixture {
    /// Product key
    pub product: String,

    /// Requested quantity
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}
