//! Checkout and line item types as returned by the commerce backend.

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::{CheckoutId, LineItemId, VariantId};
use crate::money::{Money, Price};

/// Free-form key/value attached to a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAttribute {
    pub key: String,
    pub value: String,
}

impl CustomAttribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Image shown next to a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemImage {
    pub src: String,
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// The purchased variant of a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemVariant {
    pub id: VariantId,
    pub title: String,
    #[serde(default)]
    pub image: Option<LineItemImage>,
    #[serde(rename = "priceV2")]
    pub price: Price,
}

/// An item in a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: LineItemId,
    pub title: String,
    pub quantity: i64,
    pub variant: LineItemVariant,
    #[serde(default)]
    pub custom_attributes: Vec<CustomAttribute>,
}

impl LineItem {
    /// Value of the custom attribute `key`, if set.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.custom_attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }

    /// Storefront link back to the product, stored as the first attribute.
    pub fn product_link(&self) -> Option<&str> {
        self.custom_attributes.first().map(|a| a.value.as_str())
    }

    /// Unit price times quantity.
    pub fn total(&self, precision: u32) -> Result<Money, CommerceError> {
        self.variant.price.money(precision)?.checked_mul(self.quantity)
    }
}

/// A line item to be added to a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemToAdd {
    pub variant_id: VariantId,
    pub quantity: i64,
    #[serde(default)]
    pub custom_attributes: Vec<CustomAttribute>,
}

impl LineItemToAdd {
    pub fn new(variant_id: impl Into<VariantId>, quantity: i64) -> Self {
        Self {
            variant_id: variant_id.into(),
            quantity,
            custom_attributes: Vec::new(),
        }
    }

    /// Attach a custom attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_attributes.push(CustomAttribute::new(key, value));
        self
    }
}

/// A checkout (the backend's cart).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
    pub id: CheckoutId,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default, rename = "subtotalPriceV2")]
    pub subtotal_price: Option<Price>,
}

impl Checkout {
    /// An empty checkout.
    pub fn new(id: impl Into<CheckoutId>) -> Self {
        Self {
            id: id.into(),
            line_items: Vec::new(),
            web_url: None,
            subtotal_price: None,
        }
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.line_items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Find a line item.
    pub fn line_item(&self, id: &LineItemId) -> Option<&LineItem> {
        self.line_items.iter().find(|i| &i.id == id)
    }

    /// Sum of line totals at `precision`.
    pub fn computed_subtotal(&self, precision: u32) -> Result<Money, CommerceError> {
        self.line_items
            .iter()
            .try_fold(Money::zero(precision), |acc, item| {
                acc.checked_add(&item.total(precision)?)
            })
    }
}
