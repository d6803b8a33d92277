//! Tucano Cart - cart state engine for the Tucano Shoes storefront.
//!
//! This crate owns the shopper's cart: an ordered, id-unique list of line
//! items held in memory, mirrored to a durable key-value snapshot after
//! every successful mutation, and validated against the catalog's stock
//! before a quantity ever changes.
//!
//! # Architecture
//!
//! - [`transition`] holds the pure cart transitions; no I/O lives there
//! - [`store::CartStore`] is the side-effecting shell: one mutex-guarded
//!   cart per session, injected [`catalog::Catalog`], [`storage::KeyValueStorage`]
//!   and [`notify::Notifier`] implementations
//! - Operations never return errors to callers; outcomes surface through
//!   the notifier only
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tucano_cart::{CartStore, catalog::CatalogClient, config::CartConfig};
//! use tucano_cart::{notify::TracingNotifier, storage::FileStorage};
//!
//! let config = CartConfig::from_env()?;
//! let catalog = Arc::new(CatalogClient::new(&config.catalog)?);
//! let storage = Arc::new(FileStorage::new(&config.cart_file));
//! let store = CartStore::new(catalog, storage, Arc::new(TracingNotifier));
//!
//! store.add_product(ProductId::new(1)).await;
//! let items = store.items().await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod storage;
pub mod store;
pub mod transition;

pub use store::{CART_STORAGE_KEY, CartStore};
