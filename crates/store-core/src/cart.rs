//! # Cart Types
//!
//! Cart snapshot types consumed by checkout and the shipping estimator.
//! The cart itself lives client-side; the server only ever sees an
//! immutable snapshot of it.

use crate::money::{Currency, Price};
use crate::product::{Product, ProductKind};
use serde::{Deserialize, Serialize};

/// One line of a cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product ID
    pub product_id: String,

    /// Product title (denormalized for display)
    pub title: String,

    /// Unit price
    pub unit_price: Price,

    /// Quantity (>= 1)
    pub quantity: u32,

    /// Physical or digital
    #[serde(default)]
    pub kind: ProductKind,
}

impl CartLine {
    /// Create a cart line from a product
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            title: product.title.clone(),
            unit_price: product.price,
            quantity,
            kind: product.kind,
        }
    }

    /// Line total, saturating on overflow
    pub fn total(&self) -> Price {
        Price {
            amount: self
                .unit_price
                .amount
                .saturating_mul(i64::from(self.quantity)),
            currency: self.unit_price.currency,
        }
    }
}

/// An immutable snapshot of the cart.
///
/// Invariant: `subtotal` equals the sum of line totals. The constructor
/// enforces this; consumers (the estimator in particular) never mutate
/// a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Ordered cart lines
    pub lines: Vec<CartLine>,

    /// Precomputed subtotal (sum of unit_price x quantity)
    pub subtotal: Price,
}

impl CartSnapshot {
    /// Build a snapshot from lines, computing the subtotal
    pub fn new(lines: Vec<CartLine>) -> Self {
        let currency = lines
            .first()
            .map(|l| l.unit_price.currency)
            .unwrap_or_default();
        let subtotal = lines
            .iter()
            .fold(Price::zero(currency), |acc, line| Price {
                amount: acc.amount.saturating_add(line.total().amount),
                currency,
            });
        Self { lines, subtotal }
    }

    /// An empty cart
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total unit count across all lines
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Lines that require shipping
    pub fn physical_lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter().filter(|l| !l.kind.is_digital())
    }

    /// True when nothing in the cart requires shipping (also true for
    /// an empty cart)
    pub fn is_all_digital(&self) -> bool {
        self.physical_lines().next().is_none()
    }
}
