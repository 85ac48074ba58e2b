use crate::core::models::order::Order;
use crate::core::models::product::Product;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One line of a reconciled view: live product detail joined with
/// the tracked quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

/// A stored order joined with its re-resolved line detail. Lines
/// whose product no longer exists in the catalog are omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub order: Order,
    pub lines: Vec<CartLine>,
}

/// Display total of a non-empty cart view. The currency label is
/// taken from the first line; multi-currency carts are not a
/// supported input.
#[derive(Debug, Clone, PartialEq)]
pub struct CartTotal {
    /// Sum of price x quantity, rounded to 2 decimal places.
    pub amount: f64,
    pub currency: String,
}

impl fmt::Display for CartTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}", self.currency, self.amount)
    }
}
