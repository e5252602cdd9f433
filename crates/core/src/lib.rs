//! Marula Core - Shared types library.
//!
//! This crate provides the domain types shared by the cart engine and any
//! future Marula components. It contains only types - no I/O, no HTTP
//! clients - so it can be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, quantities, and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
