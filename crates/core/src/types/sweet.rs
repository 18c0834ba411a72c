//! Catalog sweet as returned by the catalog listing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::SweetId;

/// A sweet from the catalog.
///
/// `quantity` is the stock on hand when the sweet was fetched. The cart copies
/// it into a line's ceiling at add time and never re-checks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sweet {
    pub id: SweetId,
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Image reference (URL or asset path).
    #[serde(default)]
    pub image: String,
    /// Stock on hand.
    pub quantity: u32,
}

impl Sweet {
    /// Create a sweet with no image.
    #[must_use]
    pub fn new(id: SweetId, name: impl Into<String>, price: Decimal, quantity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image: String::new(),
            quantity,
        }
    }

    /// Attach an image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Whether any stock is left.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweet_deserializes_catalog_payload() {
        let sweet: Sweet = serde_json::from_str(
            r#"{"id":3,"name":"Kaju Katli","price":12.5,"quantity":40,"category":"barfi"}"#,
        )
        .expect("catalog sweet");

        assert_eq!(sweet.id, SweetId::new(3));
        assert_eq!(sweet.price, Decimal::new(125, 1));
        assert!(sweet.image.is_empty());
        assert!(sweet.in_stock());
    }

    #[test]
    fn test_out_of_stock() {
        let sweet = Sweet::new(SweetId::new(1), "Ladoo", Decimal::ONE, 0);
        assert!(!sweet.in_stock());
    }
}
