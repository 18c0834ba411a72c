//! Sweet Shop Core - Shared types library.
//!
//! This crate provides common types used across all Sweet Shop components:
//! - `storefront` - Cart store, storage bridge and guarded route table
//! - `cli` - Command-line front end that drives the storefront against disk
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! routing. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, catalog sweets and the stored user record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
