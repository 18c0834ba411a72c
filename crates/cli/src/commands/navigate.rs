//! Router commands.

use sweet_shop_storefront::{FileStorage, Result, ShopState};

/// Navigate to `path` and print the route the router settled on.
///
/// A guard redirect is reported, not treated as a failure.
///
/// # Errors
///
/// Returns an error if the path matches no route or leaves the application.
#[allow(clippy::print_stdout, clippy::print_stderr)]
pub fn navigate(state: &mut ShopState<FileStorage>, path: &str) -> Result<()> {
    let nav = state.router_mut().navigate(path)?;

    if let Some(notice) = &nav.notice {
        eprintln!("{notice}");
    }
    if let Some(from) = &nav.redirected_from {
        println!("{from} -> {} ({}, {})", nav.path, nav.route.name, nav.route.view);
    } else {
        println!("{} ({}, {})", nav.path, nav.route.name, nav.route.view);
    }
    Ok(())
}

/// Print the route table.
#[allow(clippy::print_stdout)]
pub fn routes(state: &ShopState<FileStorage>) {
    for route in state.router().table().routes() {
        let guard = if route.meta.requires_admin {
            "admin only"
        } else {
            ""
        };
        println!(
            "{:<15} {:<14} {:<17} {guard}",
            route.path, route.name, route.view
        );
    }
}
