//! Stand-in for the login flow.
//!
//! The real login screen stores the signed-in user under `currentUser`. These
//! commands write that record directly so the admin guard can be exercised.

use sweet_shop_core::{CurrentUser, UserType};
use sweet_shop_storefront::storage::keys;
use sweet_shop_storefront::{FileStorage, KeyValueStorage, Result, ShopState};

/// Store a current-user record.
///
/// # Errors
///
/// Returns an error if the record cannot be written.
pub fn login(
    state: &ShopState<FileStorage>,
    user_type: UserType,
    username: Option<String>,
) -> Result<()> {
    let user = CurrentUser {
        username,
        ..CurrentUser::new(user_type)
    };
    let json = serde_json::to_string(&user)?;
    state.storage().set_item(keys::CURRENT_USER, &json)?;
    tracing::info!(user_type = %user_type, "Stored current user");
    Ok(())
}

/// Remove the current-user record.
///
/// # Errors
///
/// Returns an error if storage cannot be written.
pub fn logout(state: &ShopState<FileStorage>) -> Result<()> {
    state.storage().remove_item(keys::CURRENT_USER)?;
    tracing::info!("Removed current user");
    Ok(())
}
