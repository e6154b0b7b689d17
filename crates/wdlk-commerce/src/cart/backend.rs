//! Seams to the commerce backend and to checkout id persistence.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::cart::{Checkout, LineItemToAdd};
use crate::error::CommerceError;
use crate::ids::{CheckoutId, LineItemId};

/// Checkout operations of the commerce backend.
#[async_trait]
pub trait CheckoutClient: Send + Sync {
    /// Fetch a checkout. `Ok(None)` if the backend no longer knows it.
    async fn fetch(&self, id: &CheckoutId) -> Result<Option<Checkout>, CommerceError>;

    /// Create an empty checkout.
    async fn create(&self) -> Result<Checkout, CommerceError>;

    /// Add line items and return the updated checkout.
    async fn add_line_items(
        &self,
        id: &CheckoutId,
        line_items: &[LineItemToAdd],
    ) -> Result<Checkout, CommerceError>;

    /// Remove line items and return the updated checkout.
    async fn remove_line_items(
        &self,
        id: &CheckoutId,
        line_item_ids: &[LineItemId],
    ) -> Result<Checkout, CommerceError>;
}

#[async_trait]
impl<T: CheckoutClient + ?Sized> CheckoutClient for Arc<T> {
    async fn fetch(&self, id: &CheckoutId) -> Result<Option<Checkout>, CommerceError> {
        (**self).fetch(id).await
    }

    async fn create(&self) -> Result<Checkout, CommerceError> {
        (**self).create().await
    }

    async fn add_line_items(
        &self,
        id: &CheckoutId,
        line_items: &[LineItemToAdd],
    ) -> Result<Checkout, CommerceError> {
        (**self).add_line_items(id, line_items).await
    }

    async fn remove_line_items(
        &self,
        id: &CheckoutId,
        line_item_ids: &[LineItemId],
    ) -> Result<Checkout, CommerceError> {
        (**self).remove_line_items(id, line_item_ids).await
    }
}

/// Persistent string storage for the active checkout id.
pub trait CheckoutStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CommerceError>;

    fn set(&self, key: &str, value: &str) -> Result<(), CommerceError>;
}

/// Process-local [`CheckoutStore`].
#[derive(Debug, Default, Clone)]
pub struct MemoryCheckoutStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryCheckoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with `key` already set.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.into(), value.into());
        }
        store
    }
}

impl CheckoutStore for MemoryCheckoutStore {
    fn get(&self, key: &str) -> Result<Option<String>, CommerceError> {
        let values = self
            .values
            .lock()
            .map_err(|e| CommerceError::Storage(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CommerceError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| CommerceError::Storage(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
