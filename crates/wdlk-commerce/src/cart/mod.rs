//! Shopping cart module.
//!
//! Contains the checkout types, the pure cart reducer and the provider that
//! sequences backend calls and feeds their results back into the reducer.

mod backend;
mod checkout;
mod provider;
mod reducer;

pub use backend::{CheckoutClient, CheckoutStore, MemoryCheckoutStore};
pub use checkout::{
    Checkout, CustomAttribute, LineItem, LineItemImage, LineItemToAdd, LineItemVariant,
};
pub use provider::{CartProvider, DEFAULT_STORAGE_KEY};
pub use reducer::{reduce, CartAction, CartState};
