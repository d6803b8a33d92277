//! Unified error type for cart operations.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::storage::StorageError;

/// Internal failure raised while applying a cart operation.
///
/// Never crosses the store boundary: [`crate::store::CartStore`] absorbs
/// it, logs it, and surfaces the operation's generic notification instead.
#[derive(Debug, Error)]
pub enum CartError {
    /// Catalog lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Durable snapshot read/write failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart snapshot could not be serialized.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tucano_core::ProductId;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::Catalog(CatalogError::NotFound(ProductId::new(5)));
        assert_eq!(err.to_string(), "Catalog error: Product not found: 5");
    }
}
