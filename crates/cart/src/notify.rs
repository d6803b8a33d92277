//! User-facing notification channel.
//!
//! Cart operations never return errors to callers; every outcome the
//! shopper needs to see rides a fire-and-forget [`Notifier`]. The message
//! constants are the storefront's pt-BR copy.

use std::sync::{Mutex, MutexGuard};

/// A product could not be added to the cart.
pub const ADD_PRODUCT_FAILED: &str = "Erro na adição do produto";

/// The requested quantity exceeds the available stock.
pub const OUT_OF_STOCK: &str = "Quantidade solicitada fora de estoque";

/// A product could not be removed from the cart.
pub const REMOVE_PRODUCT_FAILED: &str = "Erro na remoção do produto";

/// A line item's quantity could not be changed.
pub const UPDATE_AMOUNT_FAILED: &str = "Erro na alteração de quantidade do produto";

/// Fire-and-forget sink for shopper-facing error messages.
pub trait Notifier: Send + Sync {
    /// Surface an error message to the shopper.
    fn error(&self, message: &str);
}

/// Logs notifications at warn level.
///
/// The default for embedders whose UI layer subscribes to tracing, and for
/// the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::warn!(%message, "cart notification");
    }
}

/// Collects notifications in memory.
///
/// Useful in tests and in headless embedders that drain messages on their
/// own schedule.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages recorded so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        match self.messages.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.lock().push(message.to_string());
    }
}
