//! Application state built once at startup.

use sweet_shop_core::CurrencyCode;

use crate::cart::{CartLoad, CartStore};
use crate::config::ShopConfig;
use crate::router::{AdminGuard, RouteTable, Router};
use crate::storage::{FileStorage, KeyValueStorage};

/// The cart store and router for one application instance.
///
/// Both share the same storage handle. Create it once at startup and pass
/// references to whatever needs the cart or the router.
#[derive(Debug)]
pub struct ShopState<S> {
    cart: CartStore<S>,
    router: Router,
    currency: CurrencyCode,
}

impl<S> ShopState<S>
where
    S: KeyValueStorage + Clone + 'static,
{
    /// Build the state over `storage` and rehydrate the cart from it.
    #[must_use]
    pub fn new(config: &ShopConfig, storage: S) -> Self {
        let mut router = Router::new(config.base_url.clone(), RouteTable::standard());
        router.before_each(AdminGuard::new(storage.clone()));

        let mut cart = CartStore::new(storage);
        match cart.load_cart() {
            CartLoad::Restored { items } => tracing::info!(items, "Cart restored"),
            CartLoad::Discarded => tracing::warn!("Stored cart discarded"),
            CartLoad::Missing => tracing::debug!("No stored cart"),
        }

        Self {
            cart,
            router,
            currency: config.currency,
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore<S> {
        &mut self.cart
    }

    #[must_use]
    pub const fn router(&self) -> &Router {
        &self.router
    }

    pub const fn router_mut(&mut self) -> &mut Router {
        &mut self.router
    }

    /// Currency totals are displayed in.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Storage shared by the cart and the admin guard.
    #[must_use]
    pub const fn storage(&self) -> &S {
        self.cart.storage()
    }
}

impl ShopState<FileStorage> {
    /// Build the state over the file storage named in `config`.
    #[must_use]
    pub fn from_config(config: &ShopConfig) -> Self {
        let storage =
            FileStorage::new(config.storage_path.clone()).with_quota(config.storage_quota);
        Self::new(config, storage)
    }
}
