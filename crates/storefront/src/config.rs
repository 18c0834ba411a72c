//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SWEET_SHOP_STORAGE_PATH` - Storage file (default: `.sweet-shop/storage.json`)
//! - `SWEET_SHOP_BASE_URL` - History base URL (default: `http://localhost:5173/`)
//! - `SWEET_SHOP_STORAGE_QUOTA_BYTES` - Storage quota, `0` disables (default: 5 MiB)
//! - `SWEET_SHOP_CURRENCY` - Currency for totals (default: `USD`)

use std::path::PathBuf;

use sweet_shop_core::CurrencyCode;
use thiserror::Error;
use url::Url;

use crate::storage::DEFAULT_QUOTA_BYTES;

const DEFAULT_STORAGE_PATH: &str = ".sweet-shop/storage.json";
const DEFAULT_BASE_URL: &str = "http://localhost:5173/";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    /// File backing the durable key-value storage
    pub storage_path: PathBuf,
    /// Base URL the router resolves navigation targets against
    pub base_url: Url,
    /// Storage quota in bytes, `None` for unlimited
    pub storage_quota: Option<usize>,
    /// Currency cart totals are shown in
    pub currency: CurrencyCode,
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or_default = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let storage_path = PathBuf::from(get_or_default(
            "SWEET_SHOP_STORAGE_PATH",
            DEFAULT_STORAGE_PATH,
        ));

        let base_url = Url::parse(&get_or_default("SWEET_SHOP_BASE_URL", DEFAULT_BASE_URL))
            .map_err(|e| invalid("SWEET_SHOP_BASE_URL", &e))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("SWEET_SHOP_BASE_URL", &"URL cannot be a base"));
        }

        let storage_quota = get_or_default(
            "SWEET_SHOP_STORAGE_QUOTA_BYTES",
            &DEFAULT_QUOTA_BYTES.to_string(),
        )
        .trim()
        .parse::<usize>()
        .map_err(|e| invalid("SWEET_SHOP_STORAGE_QUOTA_BYTES", &e))?;

        let currency = get_or_default("SWEET_SHOP_CURRENCY", "USD")
            .parse::<CurrencyCode>()
            .map_err(|e| invalid("SWEET_SHOP_CURRENCY", &e))?;

        Ok(Self {
            storage_path,
            base_url,
            storage_quota: (storage_quota > 0).then_some(storage_quota),
            currency,
        })
    }
}

fn invalid(key: &str, err: &impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}
