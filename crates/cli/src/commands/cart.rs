//! Cart subcommands.
//!
//! Each invocation opens the store from the configured snapshot file,
//! applies one operation, and renders the resulting cart. Notifications
//! surface through tracing, like all other CLI output.

use std::sync::Arc;

use tucano_cart::CartStore;
use tucano_cart::catalog::CatalogClient;
use tucano_cart::config::CartConfig;
use tucano_cart::notify::TracingNotifier;
use tucano_cart::storage::FileStorage;
use tucano_core::ProductId;

/// Build a store from environment configuration.
///
/// # Errors
///
/// Returns an error if configuration is missing/invalid or the catalog
/// client fails to build.
pub fn open_store() -> Result<CartStore, Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;

    let catalog = Arc::new(CatalogClient::new(&config.catalog)?);
    let storage = Arc::new(FileStorage::new(&config.cart_file));

    Ok(CartStore::new(catalog, storage, Arc::new(TracingNotifier)))
}

/// Add one unit of a product.
pub async fn add(store: &CartStore, id: i32) {
    store.add_product(ProductId::new(id)).await;
}

/// Remove a product's line item.
pub async fn remove(store: &CartStore, id: i32) {
    store.remove_product(ProductId::new(id)).await;
}

/// Set a line item's quantity.
pub async fn set_amount(store: &CartStore, id: i32, amount: i32) {
    store.update_product_amount(ProductId::new(id), amount).await;
}

/// Log the cart, one line per item, then the totals.
pub async fn render(store: &CartStore) {
    let items = store.items().await;

    if items.is_empty() {
        tracing::info!("Cart is empty");
        return;
    }

    for item in &items {
        tracing::info!(
            "  [{}] {} x{} @ {}",
            item.id(),
            item.product.title,
            item.amount,
            item.product.price
        );
    }

    let summary = store.summary().await;
    tracing::info!(
        "Total: {} item(s), {}",
        summary.item_count,
        summary.subtotal
    );
}
