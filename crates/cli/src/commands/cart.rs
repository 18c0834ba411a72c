//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! sweet-cli cart show
//! sweet-cli cart add --id 1 --name "Rasgulla" --price 3.25 --stock 12
//! sweet-cli cart update 1 4
//! sweet-cli cart remove 1
//! sweet-cli cart clear
//! ```

use rust_decimal::Decimal;
use sweet_shop_core::{Price, Sweet, SweetId};
use sweet_shop_storefront::{AppError, FileStorage, ShopState};

/// Print every line and the cart totals.
#[allow(clippy::print_stdout)]
pub fn show(state: &ShopState<FileStorage>) {
    let cart = state.cart();
    if cart.is_cart_empty() {
        println!("Cart is empty");
        return;
    }

    let currency = state.currency();
    for item in cart.items() {
        println!(
            "{:>5}  {:<24} {:>3} x {:>10} = {:>10}  (max {})",
            item.id.as_i32(),
            item.name,
            item.quantity,
            Price::new(item.price, currency),
            Price::new(item.line_total(), currency),
            item.max_quantity,
        );
    }
    println!(
        "{} item(s), total {}",
        cart.cart_item_count(),
        cart.cart_total_price(currency)
    );
}

/// Add `quantity` units of a sweet described on the command line.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a negative price or a sweet with no
/// stock.
pub fn add(
    state: &mut ShopState<FileStorage>,
    id: SweetId,
    name: String,
    price: Decimal,
    stock: u32,
    image: String,
    quantity: u32,
) -> Result<(), AppError> {
    if price.is_sign_negative() {
        return Err(AppError::BadRequest(format!("price must not be negative: {price}")));
    }

    let sweet = Sweet::new(id, name, price, stock).with_image(image);
    if !sweet.in_stock() {
        return Err(AppError::BadRequest(format!("{} is out of stock", sweet.name)));
    }

    state.cart_mut().add_to_cart(&sweet, quantity);
    tracing::info!(
        sweet_id = %id,
        items = state.cart().cart_item_count(),
        "Added to cart"
    );
    show(state);
    Ok(())
}

pub fn remove(state: &mut ShopState<FileStorage>, id: SweetId) {
    if state.cart().get(id).is_none() {
        tracing::info!(sweet_id = %id, "Not in cart");
    }
    state.cart_mut().remove_from_cart(id);
    show(state);
}

pub fn update(state: &mut ShopState<FileStorage>, id: SweetId, quantity: i64) {
    if state.cart().get(id).is_none() {
        tracing::info!(sweet_id = %id, "Not in cart");
    }
    state.cart_mut().update_cart_item_quantity(id, quantity);
    show(state);
}

pub fn clear(state: &mut ShopState<FileStorage>) {
    state.cart_mut().clear_cart();
    tracing::info!("Cart cleared");
    show(state);
}
