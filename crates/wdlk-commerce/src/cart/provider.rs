//! Cart provider: runs backend calls for cart actions and folds their
//! results into the cart state.

use wdlk_core::{StoreConfig, StructuredLogger};

use crate::cart::{
    reduce, CartAction, CartState, Checkout, CheckoutClient, CheckoutStore, LineItemToAdd,
};
use crate::error::CommerceError;
use crate::ids::{CheckoutId, LineItemId};

/// Default key the active checkout id is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "shopify_checkout_id";

/// Owns the cart state and the backend it is synchronized with.
///
/// Backend failures never corrupt the state: they are logged at warn level,
/// returned to the caller, and the cart keeps its previous value.
pub struct CartProvider<C, S> {
    client: C,
    store: S,
    storage_key: String,
    state: CartState,
    logger: StructuredLogger,
}

impl<C: CheckoutClient, S: CheckoutStore> CartProvider<C, S> {
    /// Create a provider with an empty cart.
    pub fn new(client: C, store: S) -> Self {
        Self {
            client,
            store,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            state: CartState::default(),
            logger: StructuredLogger::new("cart"),
        }
    }

    /// Create a provider using the storage key and logging from `config`.
    pub fn from_config(client: C, store: S, config: &StoreConfig) -> Self {
        Self::new(client, store)
            .with_storage_key(config.checkout.storage_key.clone())
            .with_logger(StructuredLogger::from_config("cart", &config.logging))
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_logger(mut self, logger: StructuredLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn cart_id(&self) -> Option<&CheckoutId> {
        self.state.cart_id()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run `action` to completion.
    ///
    /// Effects (initialize, add, remove) call the backend and, on success,
    /// are followed by an `UpdateCart` with the returned checkout.
    pub async fn dispatch(&mut self, action: CartAction) -> Result<(), CommerceError> {
        let result = match &action {
            CartAction::UpdateCart(_) => {
                self.state = reduce(&self.state, &action);
                return Ok(());
            }
            CartAction::InitializeCheckout => self.initialize_checkout().await,
            CartAction::AddCartItems {
                cart_id,
                line_items,
            } => self.add_line_items(cart_id, line_items).await,
            CartAction::RemoveCartItem {
                cart_id,
                line_item_id,
            } => self.remove_line_item(cart_id, line_item_id).await,
        };

        match result {
            Ok(checkout) => {
                self.state = reduce(&self.state, &CartAction::UpdateCart(checkout));
                Ok(())
            }
            Err(e) => {
                self.logger
                    .warn_builder(format!("cart reducer ({}) failed", action.name()))
                    .field("error", e.to_string())
                    .emit();
                if matches!(action, CartAction::InitializeCheckout) {
                    self.forget_checkout();
                }
                Err(e)
            }
        }
    }

    async fn initialize_checkout(&self) -> Result<Checkout, CommerceError> {
        let stored = self
            .store
            .get(&self.storage_key)?
            .map(CheckoutId::new)
            .filter(|id| !id.is_empty());

        if let Some(id) = stored {
            if let Some(checkout) = self.client.fetch(&id).await? {
                if !checkout.id.is_empty() {
                    return Ok(checkout);
                }
            }
            self.logger
                .info_builder("stored checkout no longer available")
                .field("checkout_id", id.as_str())
                .emit();
        }

        let checkout = self.client.create().await?;
        self.store.set(&self.storage_key, checkout.id.as_str())?;
        Ok(checkout)
    }

    async fn add_line_items(
        &self,
        cart_id: &CheckoutId,
        line_items: &[LineItemToAdd],
    ) -> Result<Checkout, CommerceError> {
        if let Some(item) = line_items.iter().find(|i| i.quantity <= 0) {
            return Err(CommerceError::InvalidQuantity(item.quantity));
        }
        self.client.add_line_items(cart_id, line_items).await
    }

    async fn remove_line_item(
        &self,
        cart_id: &CheckoutId,
        line_item_id: &LineItemId,
    ) -> Result<Checkout, CommerceError> {
        self.client
            .remove_line_items(cart_id, std::slice::from_ref(line_item_id))
            .await
    }

    fn forget_checkout(&self) {
        if let Err(e) = self.store.set(&self.storage_key, "") {
            self.logger
                .warn_builder("failed to clear stored checkout id")
                .field("error", e.to_string())
                .emit();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use wdlk_core::{LogLevel, MemorySink};

    use super::*;
    use crate::cart::{LineItem, LineItemVariant, MemoryCheckoutStore};
    use crate::ids::VariantId;
    use crate::money::Price;

    /// In-memory backend.
    #[derive(Default)]
    struct FakeClient {
        checkouts: Mutex<HashMap<CheckoutId, Checkout>>,
        next_id: AtomicU32,
        failing: AtomicBool,
        created: AtomicU32,
    }

    impl FakeClient {
        fn with_checkout(checkout: Checkout) -> Self {
            let client = Self::default();
            client
                .checkouts
                .lock()
                .unwrap()
                .insert(checkout.id.clone(), checkout);
            client
        }

        fn fail(&self) {
            self.failing.store(true, Ordering::SeqCst);
        }

        fn check(&self) -> Result<(), CommerceError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(CommerceError::Backend("503 Service Unavailable".to_string()));
            }
            Ok(())
        }

        fn update(
            &self,
            id: &CheckoutId,
            f: impl FnOnce(&mut Checkout),
        ) -> Result<Checkout, CommerceError> {
            self.check()?;
            let mut checkouts = self.checkouts.lock().unwrap();
            let checkout = checkouts
                .get_mut(id)
                .ok_or_else(|| CommerceError::CheckoutNotFound(id.to_string()))?;
            f(checkout);
            Ok(checkout.clone())
        }
    }

    #[async_trait]
    impl CheckoutClient for FakeClient {
        async fn fetch(&self, id: &CheckoutId) -> Result<Option<Checkout>, CommerceError> {
            self.check()?;
            Ok(self.checkouts.lock().unwrap().get(id).cloned())
        }

        async fn create(&self) -> Result<Checkout, CommerceError> {
            self.check()?;
            let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            self.created.fetch_add(1, Ordering::SeqCst);
            let checkout = Checkout::new(format!("new-{}", n));
            self.checkouts
                .lock()
                .unwrap()
                .insert(checkout.id.clone(), checkout.clone());
            Ok(checkout)
        }

        async fn add_line_items(
            &self,
            id: &CheckoutId,
            line_items: &[LineItemToAdd],
        ) -> Result<Checkout, CommerceError> {
            self.update(id, |checkout| {
                for item in line_items {
                    let line_id = format!("li-{}", item.variant_id);
                    checkout.line_items.push(LineItem {
                        id: LineItemId::new(line_id),
                        title: "Oak Board".to_string(),
                        quantity: item.quantity,
                        variant: LineItemVariant {
                            id: item.variant_id.clone(),
                            title: "Natural".to_string(),
                            image: None,
                            price: Price::new("89.00", "EUR"),
                        },
                        custom_attributes: item.custom_attributes.clone(),
                    });
                }
            })
        }

        async fn remove_line_items(
            &self,
            id: &CheckoutId,
            line_item_ids: &[LineItemId],
        ) -> Result<Checkout, CommerceError> {
            self.update(id, |checkout| {
                checkout.line_items.retain(|i| !line_item_ids.contains(&i.id));
            })
        }
    }

    fn provider(
        client: FakeClient,
        store: MemoryCheckoutStore,
    ) -> (CartProvider<Arc<FakeClient>, MemoryCheckoutStore>, Arc<FakeClient>, MemorySink) {
        let client = Arc::new(client);
        let sink = MemorySink::new();
        let logger = StructuredLogger::new("cart").with_sink(Arc::new(sink.clone()));
        let provider = CartProvider::new(client.clone(), store).with_logger(logger);
        (provider, client, sink)
    }

    fn stored_id(provider: &CartProvider<Arc<FakeClient>, MemoryCheckoutStore>) -> Option<String> {
        provider.store().get(DEFAULT_STORAGE_KEY).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_creates_and_stores_checkout() {
        let (mut provider, client, _) = provider(FakeClient::default(), MemoryCheckoutStore::new());

        provider.dispatch(CartAction::InitializeCheckout).await.unwrap();

        assert_eq!(provider.cart_id().map(|id| id.as_str()), Some("new-1"));
        assert_eq!(stored_id(&provider).as_deref(), Some("new-1"));
        assert_eq!(client.created.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_initialize_restores_stored_checkout() {
        let mut existing = Checkout::new("c-7");
        existing.web_url = Some("https://shop.example.com/c-7".to_string());
        let store = MemoryCheckoutStore::with_value(DEFAULT_STORAGE_KEY, "c-7");
        let (mut provider, client, _) =
            provider(FakeClient::with_checkout(existing.clone()), store);

        provider.dispatch(CartAction::InitializeCheckout).await.unwrap();

        assert_eq!(provider.state().cart.as_ref(), Some(&existing));
        assert_eq!(client.created.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_initialize_replaces_unknown_checkout() {
        let store = MemoryCheckoutStore::with_value(DEFAULT_STORAGE_KEY, "expired");
        let (mut provider, _, sink) = provider(FakeClient::default(), store);

        provider.dispatch(CartAction::InitializeCheckout).await.unwrap();

        assert_eq!(provider.cart_id().map(|id| id.as_str()), Some("new-1"));
        assert_eq!(stored_id(&provider).as_deref(), Some("new-1"));
        assert_eq!(
            sink.messages_at(LogLevel::Info),
            vec!["stored checkout no longer available".to_string()]
        );
    }

    #[tokio::test]
    async fn test_initialize_ignores_blank_stored_id() {
        let store = MemoryCheckoutStore::with_value(DEFAULT_STORAGE_KEY, "");
        let (mut provider, client, sink) = provider(FakeClient::default(), store);

        provider.dispatch(CartAction::InitializeCheckout).await.unwrap();

        assert_eq!(client.created.load(Ordering::SeqCst), 1);
        assert!(sink.entries().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_failure_clears_stored_id() {
        let store = MemoryCheckoutStore::with_value(DEFAULT_STORAGE_KEY, "c-7");
        let client = FakeClient::default();
        client.fail();
        let (mut provider, _, sink) = provider(client, store);

        let result = provider.dispatch(CartAction::InitializeCheckout).await;

        assert!(matches!(result, Err(CommerceError::Backend(_))));
        assert_eq!(provider.state(), &CartState::default());
        assert_eq!(stored_id(&provider).as_deref(), Some(""));
        assert_eq!(
            sink.messages_at(LogLevel::Warn),
            vec!["cart reducer (initialize_checkout) failed".to_string()]
        );
    }

    #[tokio::test]
    async fn test_add_and_remove_items() {
        let (mut provider, _, _) = provider(FakeClient::default(), MemoryCheckoutStore::new());
        provider.dispatch(CartAction::InitializeCheckout).await.unwrap();
        let cart_id = provider.cart_id().unwrap().clone();

        provider
            .dispatch(CartAction::AddCartItems {
                cart_id: cart_id.clone(),
                line_items: vec![
                    LineItemToAdd::new("v-1", 2).with_attribute("link", "/products/oak-board"),
                    LineItemToAdd::new("v-2", 1),
                ],
            })
            .await
            .unwrap();
        assert_eq!(provider.state().item_count(), 3);
        let cart = provider.state().cart.as_ref().unwrap();
        assert_eq!(cart.line_items[0].variant.id, VariantId::new("v-1"));
        assert_eq!(cart.line_items[0].product_link(), Some("/products/oak-board"));

        provider
            .dispatch(CartAction::RemoveCartItem {
                cart_id,
                line_item_id: LineItemId::new("li-v-1"),
            })
            .await
            .unwrap();
        assert_eq!(provider.state().item_count(), 1);
        assert!(!provider.state().is_empty());
    }

    #[tokio::test]
    async fn test_add_failure_keeps_state() {
        let (mut provider, client, sink) =
            provider(FakeClient::default(), MemoryCheckoutStore::new());
        provider.dispatch(CartAction::InitializeCheckout).await.unwrap();
        let before = provider.state().clone();
        client.fail();

        let result = provider
            .dispatch(CartAction::AddCartItems {
                cart_id: before.cart_id().unwrap().clone(),
                line_items: vec![LineItemToAdd::new("v-1", 1)],
            })
            .await;

        assert!(result.is_err());
        assert_eq!(provider.state(), &before);
        assert_eq!(
            sink.messages_at(LogLevel::Warn),
            vec!["cart reducer (add_cart_items) failed".to_string()]
        );
        // Only initialization failures forget the stored checkout.
        assert_eq!(stored_id(&provider).as_deref(), Some("new-1"));
    }

    #[tokio::test]
    async fn test_add_rejects_non_positive_quantity() {
        let (mut provider, _, _) = provider(FakeClient::default(), MemoryCheckoutStore::new());
        provider.dispatch(CartAction::InitializeCheckout).await.unwrap();
        let cart_id = provider.cart_id().unwrap().clone();

        let result = provider
            .dispatch(CartAction::AddCartItems {
                cart_id,
                line_items: vec![LineItemToAdd::new("v-1", 0)],
            })
            .await;

        assert_eq!(result, Err(CommerceError::InvalidQuantity(0)));
        assert!(provider.state().is_empty());
    }

    #[tokio::test]
    async fn test_remove_from_unknown_checkout() {
        let (mut provider, _, sink) = provider(FakeClient::default(), MemoryCheckoutStore::new());

        let result = provider
            .dispatch(CartAction::RemoveCartItem {
                cart_id: CheckoutId::new("ghost"),
                line_item_id: LineItemId::new("li-1"),
            })
            .await;

        assert_eq!(
            result,
            Err(CommerceError::CheckoutNotFound("ghost".to_string()))
        );
        assert_eq!(sink.messages_at(LogLevel::Warn).len(), 1);
    }

    #[tokio::test]
    async fn test_update_cart_is_applied_directly() {
        let (mut provider, _, _) = provider(FakeClient::default(), MemoryCheckoutStore::new());
        provider
            .dispatch(CartAction::UpdateCart(Checkout::new("c-3")))
            .await
            .unwrap();
        assert_eq!(provider.cart_id().map(|id| id.as_str()), Some("c-3"));
    }

    #[tokio::test]
    async fn test_from_config_uses_storage_key() {
        let config = StoreConfig::from_toml("[checkout]\nstorage_key = \"wdlk_checkout\"").unwrap();
        let client = Arc::new(FakeClient::default());
        let mut provider =
            CartProvider::from_config(client, MemoryCheckoutStore::new(), &config);

        provider.dispatch(CartAction::InitializeCheckout).await.unwrap();

        assert_eq!(
            provider.store().get("wdlk_checkout").unwrap().as_deref(),
            Some("new-1")
        );
        assert_eq!(provider.store().get(DEFAULT_STORAGE_KEY).unwrap(), None);
    }
}
