//! Storefront cart CLI
//!
//! Drives a file-backed cart the same way a storefront page would.

use std::{io, path::PathBuf, process};

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use storefront::{
    cart::{CartStore, DEFAULT_CART_KEY, FileCartStorage},
    products::{Product, ProductUuid},
    receipt::write_receipt,
};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(name = "storefront-cart", about = "Storefront cart CLI", long_about = None)]
struct Cli {
    /// Directory holding cart snapshots
    #[arg(long, env = "CART_STORAGE_DIR", default_value = ".storefront")]
    storage_dir: PathBuf,

    /// Snapshot key
    #[arg(long, env = "CART_KEY", default_value = DEFAULT_CART_KEY)]
    key: String,

    /// ISO currency code used for display
    #[arg(long, env = "CART_CURRENCY", default_value = "GHS")]
    currency: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Add a product to the cart
    Add(AddArgs),

    /// Remove a product from the cart
    Remove(ProductArgs),

    /// Set the quantity of a product already in the cart
    Update(UpdateArgs),

    /// Remove every product from the cart
    Clear,

    /// Print the cart
    Show,

    /// Print the checkout payload and empty the cart
    Checkout(CheckoutArgs),
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product UUID; generated when omitted
    #[arg(long)]
    product: Option<ProductUuid>,

    /// Product name
    #[arg(long)]
    name: String,

    /// Unit price
    #[arg(long)]
    price: Decimal,

    /// Number of units
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    quantity: u32,
}

#[derive(Debug, Args)]
struct ProductArgs {
    /// Product UUID
    #[arg(long)]
    product: ProductUuid,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// Product UUID
    #[arg(long)]
    product: ProductUuid,

    /// New number of units
    #[arg(long)]
    quantity: u32,
}

#[derive(Debug, Args)]
struct CheckoutArgs {
    /// Keep the cart after printing the payload
    #[arg(long)]
    keep: bool,
}

fn main() {
    let _env = dotenvy::dotenv();

    fmt()
        .compact()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        eprintln!("{error}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let storage = FileCartStorage::new(cli.storage_dir);
    let mut store = CartStore::open_with_key(storage, cli.key);

    match cli.command {
        Commands::Add(args) => {
            let product = Product::new(args.product.unwrap_or_default(), args.name, args.price);

            println!("{}", product.uuid);

            store.add_to_cart(product, args.quantity);
        }
        Commands::Remove(args) => store.remove_from_cart(args.product),
        Commands::Update(args) => store.update_quantity(args.product, args.quantity),
        Commands::Clear => store.clear_cart(),
        Commands::Show => {
            write_receipt(io::stdout().lock(), store.cart(), &cli.currency)
                .map_err(|error| format!("failed to print cart: {error}"))?;
        }
        Commands::Checkout(args) => {
            if store.cart().is_empty() {
                return Err("cart is empty".to_string());
            }

            let payload = serde_json::to_string_pretty(&store.checkout_items())
                .map_err(|error| format!("failed to encode checkout items: {error}"))?;

            println!("{payload}");

            if !args.keep {
                store.clear_cart();
            }
        }
    }

    Ok(())
}
