//! Commerce layer of the Woodlike storefront.
//!
//! - **Cart**: checkout state, the cart reducer and the provider that
//!   sequences calls to the commerce backend
//! - **Money**: decimal price strings and their display formatting
//! - **Catalog**: product slugs and responsive image sources
//!
//! # Example
//!
//! ```rust,ignore
//! use wdlk_commerce::prelude::*;
//!
//! let mut provider = CartProvider::new(client, MemoryCheckoutStore::new());
//! provider.dispatch(CartAction::InitializeCheckout).await;
//! provider
//!     .dispatch(CartAction::AddCartItems {
//!         cart_id: provider.cart_id().unwrap().clone(),
//!         line_items: vec![LineItemToAdd::new("variant-1", 1)],
//!     })
//!     .await;
//! println!("{} items", provider.state().item_count());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;

pub use error::CommerceError;
pub use ids::*;
pub use money::{format_currency, Money, Price};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{format_currency, Money, Price};

    // Cart
    pub use crate::cart::{
        reduce, CartAction, CartProvider, CartState, Checkout, CheckoutClient, CheckoutStore,
        CustomAttribute, LineItem, LineItemImage, LineItemToAdd, LineItemVariant,
        MemoryCheckoutStore,
    };

    // Catalog
    pub use crate::catalog::{
        image_src_set, product_slug, srcset_attribute, ImageSize, ProductImage,
    };
}
