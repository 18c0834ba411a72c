//! Core types for Sweet Shop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod sweet;
pub mod user;

pub use id::*;
pub use price::{CurrencyCode, CurrencyCodeError, Price};
pub use sweet::Sweet;
pub use user::{CurrentUser, UserType};
