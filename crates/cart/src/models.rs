//! Domain models for the cart engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tucano_core::{CurrencyCode, Price, ProductId};

/// A product as returned by the catalog service.
///
/// Carries no quantity; the catalog's product endpoint describes the
/// product, it does not report inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
}

/// A cart line item: a product plus the quantity the shopper wants.
///
/// Serialized flat, so the durable snapshot is a list of product records
/// each carrying an `amount` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub amount: u32,
}

impl CartItem {
    /// The product id of this line item.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price.amount * Decimal::from(self.amount)
    }
}

/// Available inventory for a product.
///
/// Always fetched on demand from the catalog, never cached: the number is
/// only trusted at the moment of the mutation it gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

/// Derived cart totals for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    pub subtotal: Price,
    pub item_count: u32,
}

impl CartSummary {
    /// Compute totals over the given items.
    ///
    /// The subtotal takes its currency from the first line item; an empty
    /// cart falls back to the default currency.
    #[must_use]
    pub fn of(items: &[CartItem]) -> Self {
        let currency = items
            .first()
            .map_or_else(CurrencyCode::default, |item| {
                item.product.price.currency_code
            });
        let subtotal = items.iter().map(CartItem::line_total).sum();

        Self {
            subtotal: Price::new(subtotal, currency),
            item_count: items.iter().map(|item| item.amount).sum(),
        }
    }
}
