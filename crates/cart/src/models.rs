//! Cart mirror data model.

use marula_core::{LineItemId, Price, ProductId, Quantity};

use crate::api::wire::RemoteLineItem;

/// One entry in the cart mirror: a product and its quantity.
///
/// Every field is a snapshot of the server's record. The `id` is the stable
/// identity for update and delete calls; `product_id` drives merge-on-add.
/// `quantity` is always at least 1 - a line that reaches 0 server-side is
/// removed from the mirror, never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineItem {
    /// Server-assigned line identity.
    pub id: LineItemId,
    /// Catalog product this line refers to. Unique across the mirror.
    pub product_id: ProductId,
    /// Display name, copied from the server response.
    pub name: String,
    /// Display price, copied from the server response.
    pub price: Price,
    /// Product image URL, if the catalog has one.
    pub image: Option<String>,
    /// Current quantity, always the last server-confirmed value.
    pub quantity: Quantity,
}

impl From<RemoteLineItem> for CartLineItem {
    fn from(record: RemoteLineItem) -> Self {
        Self {
            id: record.id,
            product_id: record.product_id,
            name: record.product_name,
            price: Price::new(record.product_price),
            image: record.product_image,
            quantity: record.quantity,
        }
    }
}

/// Catalog product record handed to `add_item` by the UI.
///
/// Only `id` travels to the server; the display fields let callers render
/// optimistic UI chrome (never the mirror itself) while the round trip runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: Option<String>,
}
