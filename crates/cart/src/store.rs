//! Cart store: sole owner and writer of the local cart mirror.
//!
//! # Update discipline
//!
//! Updates are pessimistic: the mirror is mutated only after the server
//! confirms the new state, and always set to the server's returned value
//! rather than a locally computed one. This trades a little latency for the
//! elimination of client/server quantity drift under retried requests.
//!
//! # Concurrency
//!
//! Every mutating operation takes `&mut self`, so two mutations can never be
//! in flight at once for the same store - the borrow checker serializes them
//! and the lost-update race between concurrent same-line requests cannot
//! occur. Cancellation is the usual Rust kind: dropping an operation's future
//! aborts the request, and because nothing is written before the response is
//! reconciled, the mirror stays exactly as it was.

use tracing::{instrument, warn};

use marula_core::{LineItemId, Quantity};

use crate::api::CartApi;
use crate::error::CartError;
use crate::models::{CartLineItem, Product};
use crate::notify::{CartOperation, Notification, NotificationSink};

/// Successful result of one store operation.
///
/// Returned alongside the sink notification so callers can react to outcomes
/// without a rendering layer attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOutcome {
    /// A new line was inserted into the mirror.
    Added(CartLineItem),
    /// An existing line for the same product absorbed the addition; the line
    /// now carries the server's resolved quantity.
    Merged(CartLineItem),
    /// A line's quantity was set to the server-confirmed value.
    QuantityUpdated(CartLineItem),
    /// The line was removed from the mirror.
    Removed(LineItemId),
    /// The requested line is not in the mirror; no request was sent.
    ///
    /// Happens when the UI acts on a stale snapshot, e.g. a click on a row
    /// that another action already removed.
    StaleLine(LineItemId),
}

/// Local, UI-facing mirror of the remote cart, and the operations that keep
/// it consistent.
///
/// Constructed with its dependencies injected and owned by the session scope
/// that created it; the mirror starts empty, is populated by
/// [`initialize`](Self::initialize), and is dropped with the store. Readers
/// get snapshots via [`lines`](Self::lines) and never mutate.
pub struct CartStore<A, N> {
    api: A,
    sink: N,
    lines: Vec<CartLineItem>,
}

impl<A: CartApi, N: NotificationSink> CartStore<A, N> {
    /// Create a store with an empty mirror.
    pub const fn new(api: A, sink: N) -> Self {
        Self {
            api,
            sink,
            lines: Vec::new(),
        }
    }

    /// All line items, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// Look up one line by its server-assigned id.
    #[must_use]
    pub fn line(&self, line_id: &LineItemId) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| &line.id == line_id)
    }

    /// Whether the mirror holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total quantity across all lines, for cart count badges.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity.get()).sum()
    }

    /// Fetch the remote cart and replace the mirror wholesale.
    ///
    /// A failed fetch leaves the mirror empty and emits no notification (the
    /// cart simply renders empty); the error is still returned so the caller
    /// can retry or surface it.
    ///
    /// # Errors
    ///
    /// Returns the fetch error after logging it.
    #[instrument(skip(self))]
    pub async fn initialize(&mut self) -> Result<(), CartError> {
        match self.api.fetch_cart().await {
            Ok(records) => {
                self.lines = records.into_iter().map(CartLineItem::from).collect();
                Ok(())
            }
            Err(error) => {
                warn!(%error, "failed to fetch cart");
                self.lines.clear();
                Err(error)
            }
        }
    }

    /// Add one unit of `product` to the cart.
    ///
    /// The server decides whether this creates a new line or increments an
    /// existing one. If a line for the same product already exists locally it
    /// is replaced with the server record - never incremented locally, so a
    /// response from an earlier in-flight update can't cause drift.
    ///
    /// # Errors
    ///
    /// Returns the API error after reporting it to the sink; the mirror is
    /// left untouched.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add_item(&mut self, product: &Product) -> Result<CartOutcome, CartError> {
        let record = match self.api.create_or_increment(product.id, Quantity::MIN).await {
            Ok(record) => record,
            Err(error) => return Err(self.fail(CartOperation::AddItem, error)),
        };

        let line = CartLineItem::from(record);
        let existing = self
            .lines
            .iter_mut()
            .find(|candidate| candidate.product_id == line.product_id);

        let outcome = if let Some(existing) = existing {
            *existing = line.clone();
            self.sink.notify(Notification::merged(&line.name));
            CartOutcome::Merged(line)
        } else {
            self.lines.push(line.clone());
            self.sink.notify(Notification::added(&line.name));
            CartOutcome::Added(line)
        };
        Ok(outcome)
    }

    /// Increase a line's quantity by one.
    ///
    /// A line missing from the mirror is a stale-UI no-op: nothing is sent
    /// and nothing is reported.
    ///
    /// # Errors
    ///
    /// Returns the API error after reporting it to the sink; the mirror is
    /// left untouched.
    #[instrument(skip(self), fields(line_id = %line_id))]
    pub async fn increase_quantity(
        &mut self,
        line_id: &LineItemId,
    ) -> Result<CartOutcome, CartError> {
        let Some(current) = self.line(line_id).map(|line| line.quantity) else {
            return Ok(CartOutcome::StaleLine(line_id.clone()));
        };

        self.set_quantity(CartOperation::IncreaseQuantity, line_id, current.increment())
            .await
    }

    /// Decrease a line's quantity by one.
    ///
    /// The quantity floor is enforced before any network call: at quantity 1
    /// the operation fails locally, no request is sent, and the sink reports
    /// that the item must be removed instead.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Validation`] at the floor, or the API error;
    /// either way the mirror is left untouched.
    #[instrument(skip(self), fields(line_id = %line_id))]
    pub async fn decrease_quantity(
        &mut self,
        line_id: &LineItemId,
    ) -> Result<CartOutcome, CartError> {
        let Some(current) = self.line(line_id).map(|line| line.quantity) else {
            return Ok(CartOutcome::StaleLine(line_id.clone()));
        };

        let requested = match current.decrement() {
            Ok(quantity) => quantity,
            Err(error) => {
                self.sink.notify(Notification::minimum_quantity());
                return Err(CartError::Validation(error));
            }
        };

        self.set_quantity(CartOperation::DecreaseQuantity, line_id, requested)
            .await
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns the API error (including [`CartError::NotFound`] for an
    /// already-absent line) after reporting it to the sink; the mirror is
    /// left unchanged on failure.
    #[instrument(skip(self), fields(line_id = %line_id))]
    pub async fn remove_item(&mut self, line_id: &LineItemId) -> Result<CartOutcome, CartError> {
        if let Err(error) = self.api.delete_line(line_id).await {
            return Err(self.fail(CartOperation::RemoveItem, error));
        }

        self.lines.retain(|line| &line.id != line_id);
        self.sink.notify(Notification::removed());
        Ok(CartOutcome::Removed(line_id.clone()))
    }

    /// Send an absolute quantity and reconcile the line to the server's
    /// confirmed value, which may differ from the requested one.
    async fn set_quantity(
        &mut self,
        operation: CartOperation,
        line_id: &LineItemId,
        requested: Quantity,
    ) -> Result<CartOutcome, CartError> {
        let record = match self.api.update_quantity(line_id, requested).await {
            Ok(record) => record,
            Err(error) => return Err(self.fail(operation, error)),
        };

        let Some(line) = self.lines.iter_mut().find(|line| &line.id == line_id) else {
            // Mutations are serialized, so the line looked up before the
            // round trip is still expected to be present.
            warn!(%line_id, "confirmed line vanished from the mirror");
            return Ok(CartOutcome::StaleLine(line_id.clone()));
        };

        line.quantity = record.quantity;
        let line = line.clone();
        self.sink.notify(Notification::quantity_updated(operation));
        Ok(CartOutcome::QuantityUpdated(line))
    }

    /// Report a failed operation to the sink and hand the error back.
    fn fail(&self, operation: CartOperation, error: CartError) -> CartError {
        self.sink.notify(Notification::from_error(operation, &error));
        error
    }
}
