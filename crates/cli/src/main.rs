//! Sweet Shop CLI - drive the cart and router against file-backed storage.
//!
//! Each invocation behaves like reopening the shop in a browser tab: the cart
//! is rehydrated from storage, one action runs, and every change is written
//! back.
//!
//! # Usage
//!
//! ```bash
//! # Add two units of a sweet with 10 in stock
//! sweet-cli cart add --id 1 --name "Kaju Katli" --price 12.50 --stock 10 --quantity 2
//!
//! # Show the cart
//! sweet-cli cart show
//!
//! # Try the admin page, then log in as admin and try again
//! sweet-cli navigate /admin/sweets
//! sweet-cli session login --user-type admin --username boss
//! sweet-cli navigate /admin/sweets
//! ```
//!
//! # Commands
//!
//! - `cart` - Show, add, remove, update or clear cart lines
//! - `navigate` - Resolve a path through the router and its guards
//! - `routes` - List the route table
//! - `session` - Write or remove the stored current user

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use sweet_shop_core::{SweetId, UserType};
use sweet_shop_storefront::{ShopConfig, ShopState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "sweet-cli")]
#[command(author, version, about = "Sweet Shop cart and router tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Navigate to a path and report where the router ends up
    Navigate {
        /// Application path, e.g. `/sweets` or `/admin/sweets`
        path: String,
    },
    /// List the route table
    Routes,
    /// Simulate the login flow's stored user record
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add a sweet to the cart
    Add {
        /// Sweet ID
        #[arg(long)]
        id: SweetId,

        /// Display name
        #[arg(long)]
        name: String,

        /// Unit price
        #[arg(long)]
        price: Decimal,

        /// Stock on hand (becomes the line's ceiling)
        #[arg(long)]
        stock: u32,

        /// Image reference
        #[arg(long, default_value = "")]
        image: String,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a sweet from the cart
    Remove {
        /// Sweet ID
        id: SweetId,
    },
    /// Set the quantity of a cart line (zero or less removes it)
    Update {
        /// Sweet ID
        id: SweetId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart and delete the stored copy
    Clear,
}

#[derive(Subcommand)]
enum SessionAction {
    /// Store a current-user record
    Login {
        /// Account type (`admin` or `user`)
        #[arg(short, long, default_value = "user")]
        user_type: UserType,

        /// Display name
        #[arg(long)]
        username: Option<String>,
    },
    /// Remove the stored current-user record
    Logout,
}

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sweet_shop_storefront=info,sweet_shop_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> sweet_shop_storefront::Result<()> {
    let config = ShopConfig::from_env()?;
    tracing::debug!(storage = %config.storage_path.display(), "Loaded configuration");
    let mut state = ShopState::from_config(&config);

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state),
            CartAction::Add {
                id,
                name,
                price,
                stock,
                image,
                quantity,
            } => commands::cart::add(&mut state, id, name, price, stock, image, quantity)?,
            CartAction::Remove { id } => commands::cart::remove(&mut state, id),
            CartAction::Update { id, quantity } => {
                commands::cart::update(&mut state, id, quantity);
            }
            CartAction::Clear => commands::cart::clear(&mut state),
        },
        Commands::Navigate { path } => commands::navigate::navigate(&mut state, &path)?,
        Commands::Routes => commands::navigate::routes(&state),
        Commands::Session { action } => match action {
            SessionAction::Login {
                user_type,
                username,
            } => commands::session::login(&state, user_type, username)?,
            SessionAction::Logout => commands::session::logout(&state)?,
        },
    }
    Ok(())
}
