//! Marula cart synchronization engine.
//!
//! Keeps a local, UI-facing mirror of a shopping cart consistent with the
//! remote, authoritative cart service across add, increase, decrease, and
//! remove operations, while enforcing quantity invariants and reporting
//! outcomes to the user.
//!
//! # Architecture
//!
//! - [`api`] - thin REST client over the four remote cart operations, no
//!   business logic
//! - [`store`] - the [`CartStore`], sole owner and writer of the mirror;
//!   mutates only after the server confirms (pessimistic updates)
//! - [`notify`] - stateless mapping from operation outcomes to user-visible
//!   notifications
//! - [`models`] - the mirrored [`CartLineItem`] and the [`Product`] input
//!   record
//!
//! The remote service is the source of truth; the mirror is never persisted
//! locally and is always reconciled to server-returned values.
//!
//! # Example
//!
//! ```rust,ignore
//! use marula_cart::{CartStore, HttpCartClient, TracingSink, config::CartApiConfig};
//!
//! let config = CartApiConfig::from_env()?;
//! let client = HttpCartClient::new(&config)?;
//! let mut cart = CartStore::new(client, TracingSink);
//!
//! cart.initialize().await?;
//! cart.add_item(&product).await?;
//! for line in cart.lines() {
//!     println!("{} x{}", line.name, line.quantity);
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod store;

pub use api::{CartApi, HttpCartClient};
pub use error::CartError;
pub use models::{CartLineItem, Product};
pub use notify::{CartOperation, Notification, NotificationKind, NotificationSink, TracingSink};
pub use store::{CartOutcome, CartStore};
