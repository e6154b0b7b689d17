//! Cart state and the pure cart reducer.

use serde::{Deserialize, Serialize};

use crate::cart::{Checkout, LineItemToAdd};
use crate::ids::{CheckoutId, LineItemId};

/// Client-side cart state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    /// The active checkout, once initialized.
    pub cart: Option<Checkout>,
}

impl CartState {
    /// Total item count (sum of quantities). Zero before initialization.
    pub fn item_count(&self) -> i64 {
        self.cart.as_ref().map(Checkout::item_count).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.cart.as_ref().map(Checkout::is_empty).unwrap_or(true)
    }

    pub fn cart_id(&self) -> Option<&CheckoutId> {
        self.cart.as_ref().map(|c| &c.id)
    }
}

/// Cart commands.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Restore the stored checkout or create a new one.
    InitializeCheckout,
    /// Replace the cart with a checkout returned by the backend.
    UpdateCart(Checkout),
    /// Add line items to a checkout.
    AddCartItems {
        cart_id: CheckoutId,
        line_items: Vec<LineItemToAdd>,
    },
    /// Remove one line item from a checkout.
    RemoveCartItem {
        cart_id: CheckoutId,
        line_item_id: LineItemId,
    },
}

impl CartAction {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            CartAction::InitializeCheckout => "initialize_checkout",
            CartAction::UpdateCart(_) => "update_cart",
            CartAction::AddCartItems { .. } => "add_cart_items",
            CartAction::RemoveCartItem { .. } => "remove_cart_item",
        }
    }

    /// Whether the action needs a backend round trip before it changes state.
    pub fn is_effect(&self) -> bool {
        !matches!(self, CartAction::UpdateCart(_))
    }
}

/// Apply `action` to `state`.
///
/// Only `UpdateCart` changes state here. The other actions are requests to
/// the backend; their outcome arrives later as an `UpdateCart`.
pub fn reduce(state: &CartState, action: &CartAction) -> CartState {
    match action {
        CartAction::UpdateCart(checkout) => CartState {
            cart: Some(checkout.clone()),
        },
        CartAction::InitializeCheckout
        | CartAction::AddCartItems { .. }
        | CartAction::RemoveCartItem { .. } => state.clone(),
    }
}
