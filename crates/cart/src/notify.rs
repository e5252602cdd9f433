//! User-facing outcome notifications.
//!
//! The notification sink is the UI feedback boundary: a stateless,
//! fire-and-forget mapping from an operation's outcome to a rendered message.
//! Failure messages prefer the structured message from the server response
//! and fall back to a generic per-operation message. A sink can never affect
//! cart state - [`NotificationSink::notify`] is infallible by construction.

use crate::error::CartError;

/// Which cart operation a notification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    AddItem,
    IncreaseQuantity,
    DecreaseQuantity,
    RemoveItem,
}

/// Whether the operation succeeded or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure,
}

/// A rendered user notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub operation: CartOperation,
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    /// A new line was inserted for `name`.
    pub(crate) fn added(name: &str) -> Self {
        Self::success(CartOperation::AddItem, format!("{name} added to cart."))
    }

    /// An existing line for `name` absorbed the addition.
    pub(crate) fn merged(name: &str) -> Self {
        Self::success(
            CartOperation::AddItem,
            format!("{name} quantity updated in your cart."),
        )
    }

    /// A quantity stepper succeeded.
    pub(crate) fn quantity_updated(operation: CartOperation) -> Self {
        Self::success(operation, "Quantity updated.".to_string())
    }

    /// A line was removed.
    pub(crate) fn removed() -> Self {
        Self::success(CartOperation::RemoveItem, "Item removed from cart.".to_string())
    }

    /// A decrement was refused locally at the quantity floor.
    pub(crate) fn minimum_quantity() -> Self {
        Self::failure(
            CartOperation::DecreaseQuantity,
            "Minimum quantity is 1. Remove the item to delete it.".to_string(),
        )
    }

    /// A remote operation failed.
    ///
    /// Uses the server's structured message when the error carries one,
    /// otherwise the per-operation fallback.
    pub(crate) fn from_error(operation: CartOperation, error: &CartError) -> Self {
        let message = error
            .server_message()
            .map_or_else(|| fallback_message(operation).to_string(), ToOwned::to_owned);
        Self::failure(operation, message)
    }

    const fn success(operation: CartOperation, message: String) -> Self {
        Self {
            operation,
            kind: NotificationKind::Success,
            message,
        }
    }

    const fn failure(operation: CartOperation, message: String) -> Self {
        Self {
            operation,
            kind: NotificationKind::Failure,
            message,
        }
    }
}

/// Generic failure wording when the server response carries no message.
const fn fallback_message(operation: CartOperation) -> &'static str {
    match operation {
        CartOperation::AddItem => "Failed to add to cart.",
        CartOperation::IncreaseQuantity | CartOperation::DecreaseQuantity => {
            "Failed to update quantity. Try again."
        }
        CartOperation::RemoveItem => "Failed to remove item from cart.",
    }
}

/// Maps operation outcomes to user-visible feedback.
///
/// Implementations must be fire-and-forget: `notify` returns nothing, so a
/// misbehaving sink cannot disturb the cart store's state.
pub trait NotificationSink {
    /// Deliver one notification to the user.
    fn notify(&self, notification: Notification);
}

/// Sink that emits notifications to the `tracing` log stream.
///
/// The default choice for embedders that render feedback elsewhere, and a
/// reasonable stand-in until a UI toast layer is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                tracing::info!(operation = ?notification.operation, "{}", notification.message);
            }
            NotificationKind::Failure => {
                tracing::warn!(operation = ?notification.operation, "{}", notification.message);
            }
        }
    }
}
