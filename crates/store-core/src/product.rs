//! # Product Types
//!
//! Product types for the COMPIA bookstore catalog. The seed catalog is
//! loaded from `config/products.toml`.

use crate::money::Price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a product ships in a box or by e-mail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// Printed book, shipped by carrier
    Physical,
    /// E-book or other download, no shipping
    Digital,
}

impl ProductKind {
    pub fn is_digital(&self) -> bool {
        matches!(self, ProductKind::Digital)
    }
}

impl Default for ProductKind {
    fn default() -> Self {
        ProductKind::Physical
    }
}

/// A product in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier
    pub id: String,

    /// Title
    pub title: String,

    /// Author name
    #[serde(default)]
    pub author: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Physical or digital
    #[serde(default)]
    pub kind: ProductKind,

    /// Price
    pub price: Price,

    /// Category (e.g., "machine-learning")
    #[serde(default)]
    pub category: String,

    /// Whether this product is active and available for purchase
    #[serde(default = "default_true")]
    pub active: bool,

    /// Optional cover image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Average review rating (0.0 - 5.0)
    #[serde(default)]
    pub rating: f32,

    /// Number of reviews behind the rating
    #[serde(default)]
    pub reviews_count: u32,

    /// Storefront "new release" badge
    #[serde(default)]
    pub is_new: bool,

    /// Storefront "best seller" badge
    #[serde(default)]
    pub is_best_seller: bool,

    /// Created timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Create a new physical (printed) product
    pub fn physical(id: impl Into<String>, title: impl Into<String>, price: Price) -> Self {
        Self::new(id, title, price, ProductKind::Physical)
    }

    /// Create a new digital (download) product
    pub fn digital(id: impl Into<String>, title: impl Into<String>, price: Price) -> Self {
        Self::new(id, title, price, ProductKind::Digital)
    }

    fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        price: Price,
        kind: ProductKind,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            author: String::new(),
            description: String::new(),
            kind,
            price,
            category: String::new(),
            active: true,
            image_url: None,
            rating: 0.0,
            reviews_count: 0,
            is_new: false,
            is_best_seller: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder: set author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Builder: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Builder: set category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Builder: set cover image URL
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Check if this product requires shipping
    pub fn requires_shipping(&self) -> bool {
        !self.kind.is_digital()
    }
}
