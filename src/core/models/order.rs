use crate::core::models::product::ProductId;
use serde::{Deserialize, Serialize};

/// A single (product, quantity) pair of a placed order. Only the id
/// is stored; product detail is re-resolved live when the order is
/// rendered, so later catalog edits change how past orders display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Immutable record of a completed checkout, keyed in the orders
/// collection by its own `order_id`. No update path exists once
/// written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    /// Email of the placing user.
    pub email: String,
    /// ISO-8601 creation timestamp.
    pub date: String,
    pub products: Vec<OrderLine>,
}
