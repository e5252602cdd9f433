//! Wire records for the cart service REST interface.

use marula_core::{LineItemId, ProductId, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One cart line as returned by the remote service.
///
/// This is the authoritative record for the line: the store reconciles the
/// local mirror to these values and never recomputes them locally. Prices
/// arrive as JSON numbers; quantities below 1 fail to parse because
/// [`Quantity`] validates on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLineItem {
    pub id: LineItemId,
    pub product_id: ProductId,
    pub product_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub product_price: Decimal,
    pub quantity: Quantity,
    #[serde(default)]
    pub product_image: Option<String>,
}

/// Response envelope of `GET /cart`.
#[derive(Debug, Deserialize)]
pub(crate) struct CartEnvelope {
    pub items: Vec<RemoteLineItem>,
}

/// Request body of `POST /cart`.
#[derive(Debug, Serialize)]
pub(crate) struct AddLineRequest {
    pub product_id: ProductId,
    pub quantity: Quantity,
}

/// Request body of `PATCH /cart/item/{id}`.
#[derive(Debug, Serialize)]
pub(crate) struct UpdateQuantityRequest {
    pub quantity: Quantity,
}

/// Error body shape used by the cart service.
///
/// The service is inconsistent about the field name, so both `message` and
/// `error` are accepted, preferring `message`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}
