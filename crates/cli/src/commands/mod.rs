//! CLI command implementations.

pub mod cart;
pub mod navigate;
pub mod session;
