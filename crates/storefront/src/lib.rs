//! Sweet Shop Storefront library.
//!
//! The browser-side half of the shop: a cart store that writes through to
//! durable key-value storage, and a router that maps paths to views behind an
//! admin check.
//!
//! # Modules
//!
//! - [`storage`] - Key-value storage bridge (memory and file backends)
//! - [`cart`] - Cart line items, mutations and derived totals
//! - [`router`] - Route table, navigation guards and history
//! - [`state`] - One-per-application wiring of the above
//! - [`config`] - Environment configuration
//! - [`error`] - Unified error type

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod router;
pub mod state;
pub mod storage;

pub use cart::{CartLineItem, CartLoad, CartStore};
pub use config::ShopConfig;
pub use error::{AppError, Result};
pub use router::{Navigation, NavigationError, Router};
pub use state::ShopState;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
