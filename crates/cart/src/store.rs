//! The cart store: in-memory cart, durable snapshot, stock checks.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{instrument, warn};
use tucano_core::ProductId;

use crate::catalog::Catalog;
use crate::error::CartError;
use crate::models::{CartItem, CartSummary};
use crate::notify::{self, Notifier};
use crate::storage::KeyValueStorage;
use crate::transition::{self, Rejection};

/// Storage key of the serialized cart snapshot.
pub const CART_STORAGE_KEY: &str = "@TucanoShoes:cart";

/// The shopper's cart for one session.
///
/// Holds the ordered, id-unique line items behind a single async mutex
/// that stays locked across each whole operation, stock fetch included, so
/// overlapping calls serialize instead of racing on the shared list. Every
/// successful mutation writes the new cart wholesale to the injected
/// storage under [`CART_STORAGE_KEY`].
///
/// Cheaply cloneable via `Arc`; construct one per session and hand clones
/// to whatever needs cart access. Operations return nothing - shopper
/// feedback goes through the injected [`Notifier`] only.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    items: Mutex<Vec<CartItem>>,
    catalog: Arc<dyn Catalog>,
    storage: Arc<dyn KeyValueStorage>,
    notifier: Arc<dyn Notifier>,
}

/// What an operation decided after validation.
enum Outcome {
    /// Install and persist this cart.
    Commit(Vec<CartItem>),
    /// Business-rule rejection; cart unchanged.
    Reject(Rejection),
}

impl From<Result<Vec<CartItem>, Rejection>> for Outcome {
    fn from(result: Result<Vec<CartItem>, Rejection>) -> Self {
        match result {
            Ok(items) => Self::Commit(items),
            Err(rejection) => Self::Reject(rejection),
        }
    }
}

impl CartStore {
    /// Create a store seeded from the durable snapshot.
    ///
    /// An absent, unreadable, or malformed snapshot seeds an empty cart;
    /// construction never fails.
    #[must_use]
    pub fn new(
        catalog: Arc<dyn Catalog>,
        storage: Arc<dyn KeyValueStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let items = load_snapshot(storage.as_ref());

        Self {
            inner: Arc::new(CartStoreInner {
                items: Mutex::new(items),
                catalog,
                storage,
                notifier,
            }),
        }
    }

    /// Snapshot of the current line items, in insertion order.
    pub async fn items(&self) -> Vec<CartItem> {
        self.inner.items.lock().await.clone()
    }

    /// Derived totals over the current cart.
    pub async fn summary(&self) -> CartSummary {
        CartSummary::of(&self.inner.items.lock().await)
    }

    /// Add one unit of a product to the cart.
    ///
    /// A product already in the cart gets its amount incremented, gated by
    /// a fresh stock lookup; a new product is fetched from the catalog and
    /// appended with amount 1. On insufficient stock the shopper sees
    /// [`notify::OUT_OF_STOCK`]; on any failure, [`notify::ADD_PRODUCT_FAILED`].
    #[instrument(skip(self))]
    pub async fn add_product(&self, id: ProductId) {
        let mut items = self.inner.items.lock().await;
        let outcome = self.plan_add(&items, id).await;
        self.finish(&mut items, outcome, notify::ADD_PRODUCT_FAILED);
    }

    /// Remove a product's line item from the cart.
    ///
    /// Removing an id that is not in the cart reports
    /// [`notify::REMOVE_PRODUCT_FAILED`] and changes nothing.
    #[instrument(skip(self))]
    pub async fn remove_product(&self, id: ProductId) {
        let mut items = self.inner.items.lock().await;
        let outcome = Ok(transition::remove(&items, id).into());
        self.finish(&mut items, outcome, notify::REMOVE_PRODUCT_FAILED);
    }

    /// Set a line item's quantity to `amount`.
    ///
    /// A non-positive `amount` is a silent no-op. Otherwise the quantity
    /// is gated by a fresh stock lookup before the membership check, so an
    /// unavailable quantity reports [`notify::OUT_OF_STOCK`] even for an
    /// id that is not in the cart; other failures report
    /// [`notify::UPDATE_AMOUNT_FAILED`].
    #[instrument(skip(self))]
    pub async fn update_product_amount(&self, id: ProductId, amount: i32) {
        if amount <= 0 {
            return;
        }
        let Ok(requested) = u32::try_from(amount) else {
            // unreachable: amount > 0 always fits
            return;
        };

        let mut items = self.inner.items.lock().await;
        let outcome = self.plan_update(&items, id, requested).await;
        self.finish(&mut items, outcome, notify::UPDATE_AMOUNT_FAILED);
    }

    async fn plan_add(
        &self,
        items: &[CartItem],
        id: ProductId,
    ) -> Result<Outcome, CartError> {
        if items.iter().any(|item| item.id() == id) {
            let stock = self.inner.catalog.stock(id).await?;
            Ok(transition::increment(items, id, stock).into())
        } else {
            let product = self.inner.catalog.product(id).await?;
            Ok(Outcome::Commit(transition::append(items, product)))
        }
    }

    async fn plan_update(
        &self,
        items: &[CartItem],
        id: ProductId,
        amount: u32,
    ) -> Result<Outcome, CartError> {
        let stock = self.inner.catalog.stock(id).await?;
        Ok(transition::set_amount(items, id, amount, stock).into())
    }

    /// Apply an operation's outcome: install and persist on commit, notify
    /// on rejection or failure.
    ///
    /// The persisted value is the installed value, serialized once. If the
    /// write fails the in-memory cart keeps the update and the snapshot
    /// stays stale until the next successful mutation.
    fn finish(
        &self,
        items: &mut Vec<CartItem>,
        outcome: Result<Outcome, CartError>,
        failure_message: &str,
    ) {
        match outcome {
            Ok(Outcome::Commit(next)) => {
                *items = next;
                if let Err(e) = self.persist(items) {
                    warn!(error = %e, "cart snapshot write failed");
                    self.inner.notifier.error(failure_message);
                }
            }
            Ok(Outcome::Reject(rejection)) => {
                let message = match rejection {
                    Rejection::OutOfStock => notify::OUT_OF_STOCK,
                    Rejection::NotInCart => failure_message,
                };
                self.inner.notifier.error(message);
            }
            Err(e) => {
                warn!(error = %e, "cart operation failed");
                self.inner.notifier.error(failure_message);
            }
        }
    }

    fn persist(&self, items: &[CartItem]) -> Result<(), CartError> {
        let snapshot = serde_json::to_string(items)?;
        self.inner.storage.set(CART_STORAGE_KEY, &snapshot)?;
        Ok(())
    }
}

/// Read the cart seed from storage, falling back to empty.
fn load_snapshot(storage: &dyn KeyValueStorage) -> Vec<CartItem> {
    let raw = match storage.get(CART_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "cart snapshot unreadable, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            warn!(error = %e, "cart snapshot malformed, starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use tucano_core::{CurrencyCode, Price};

    use super::*;
    use crate::catalog::CatalogError;
    use crate::models::{Product, Stock};
    use crate::notify::RecordingNotifier;
    use crate::storage::{MemoryStorage, StorageError};

    fn product(id: i32) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Tênis {id}"),
            price: Price::from_cents(19990, CurrencyCode::BRL),
            image: format!("https://cdn.tucanoshoes.com.br/p/{id}.jpg"),
        }
    }

    struct FakeCatalog {
        products: HashMap<i32, Product>,
        stock: HashMap<i32, u32>,
    }

    impl FakeCatalog {
        fn with(entries: &[(i32, u32)]) -> Self {
            Self {
                products: entries.iter().map(|&(id, _)| (id, product(id))).collect(),
                stock: entries.iter().copied().collect(),
            }
        }
    }

    #[async_trait]
    impl Catalog for FakeCatalog {
        async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
            self.products
                .get(&id.as_i32())
                .cloned()
                .ok_or(CatalogError::NotFound(id))
        }

        async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
            self.stock
                .get(&id.as_i32())
                .map(|&amount| Stock { id, amount })
                .ok_or(CatalogError::NotFound(id))
        }
    }

    /// Storage whose writes always fail.
    struct ReadOnlyStorage;

    impl KeyValueStorage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        }
    }

    #[tokio::test]
    async fn test_seeds_empty_without_snapshot() {
        let store = CartStore::new(
            Arc::new(FakeCatalog::with(&[])),
            Arc::new(MemoryStorage::new()),
            Arc::new(RecordingNotifier::new()),
        );
        assert!(store.items().await.is_empty());
    }

    #[tokio::test]
    async fn test_seeds_from_stored_snapshot() {
        let storage = Arc::new(MemoryStorage::new());
        let snapshot = serde_json::to_string(&vec![CartItem {
            product: product(3),
            amount: 2,
        }])
        .unwrap();
        storage.set(CART_STORAGE_KEY, &snapshot).unwrap();

        let store = CartStore::new(
            Arc::new(FakeCatalog::with(&[])),
            storage,
            Arc::new(RecordingNotifier::new()),
        );

        let items = store.items().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id(), ProductId::new(3));
        assert_eq!(items[0].amount, 2);
    }

    #[tokio::test]
    async fn test_seeds_empty_from_malformed_snapshot() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(CART_STORAGE_KEY, "{not a cart").unwrap();

        let store = CartStore::new(
            Arc::new(FakeCatalog::with(&[])),
            storage,
            Arc::new(RecordingNotifier::new()),
        );
        assert!(store.items().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_memory_and_notifies() {
        let notifier = Arc::new(RecordingNotifier::new());
        let store = CartStore::new(
            Arc::new(FakeCatalog::with(&[(1, 5)])),
            Arc::new(ReadOnlyStorage),
            notifier.clone(),
        );

        store.add_product(ProductId::new(1)).await;

        // In-memory cart took the update; the snapshot write failure only
        // surfaces as the operation's generic notification
        let items = store.items().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].amount, 1);
        assert_eq!(notifier.messages(), vec![notify::ADD_PRODUCT_FAILED]);
    }

    #[tokio::test]
    async fn test_summary_reflects_cart() {
        let store = CartStore::new(
            Arc::new(FakeCatalog::with(&[(1, 5)])),
            Arc::new(MemoryStorage::new()),
            Arc::new(RecordingNotifier::new()),
        );

        store.add_product(ProductId::new(1)).await;
        store.add_product(ProductId::new(1)).await;

        let summary = store.summary().await;
        assert_eq!(summary.item_count, 2);
        assert_eq!(
            summary.subtotal,
            Price::from_cents(39980, CurrencyCode::BRL)
        );
    }
}
