//! WASI Cart CLI - drive the restaurant cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add a dish (repeat to add more units)
//! wasi-cart add -i 1 -n "Lomo Saltado" -p 25.00
//!
//! # Change quantities
//! wasi-cart inc 1
//! wasi-cart set 1 4
//! wasi-cart dec 1
//!
//! # Review and hand off the order
//! wasi-cart show
//! wasi-cart checkout --link
//! ```
//!
//! # Commands
//!
//! - `add`, `remove`, `set`, `inc`, `dec`, `clear` - Mutate the cart
//! - `show` - Print the cart
//! - `checkout` - Print the order message or its WhatsApp link
//!
//! Configuration is read from the environment; see
//! [`wasi_cart_storefront::config`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::{Parser, Subcommand};
use wasi_cart_storefront::config::StorefrontConfig;
use wasi_cart_storefront::state::{open_cart, open_empty_cart};
use wasi_cart_storefront::telemetry;
use wasi_cart_storefront::views::CartView;

mod commands;

#[derive(Parser)]
#[command(name = "wasi-cart")]
#[command(author, version, about = "WASI restaurant cart")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a menu item
    Add {
        /// Menu id (e.g. `1`, `combo2`)
        #[arg(short, long)]
        id: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Unit price in soles
        #[arg(short, long)]
        price: String,
    },
    /// Remove a menu item
    Remove {
        /// Menu id
        id: String,
    },
    /// Set the quantity of a menu item (below 1 removes it)
    Set {
        /// Menu id
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Add one unit to a menu item already in the cart
    Inc {
        /// Menu id
        id: String,
    },
    /// Take one unit from a menu item, removing it at zero
    Dec {
        /// Menu id
        id: String,
    },
    /// Empty the cart (also recovers from a corrupt saved cart)
    Clear,
    /// Show the cart
    Show,
    /// Print the order message for the restaurant
    Checkout {
        /// Print the WhatsApp link instead of the plain message
        #[arg(long)]
        link: bool,
    },
}

fn main() {
    telemetry::init_tracing("wasi_cart=warn");

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => print_output(&output),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_output(output: &str) {
    println!("{output}");
}

fn run(cli: Cli) -> Result<String, Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let labels = config.locale.labels();

    // Clearing must work even when the saved cart cannot be restored.
    let mut cart = if matches!(cli.command, Commands::Clear) {
        open_empty_cart(&config)?
    } else {
        open_cart(&config)?
    };

    let changed = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&changed);
    cart.subscribe(move || flag.store(true, Ordering::SeqCst));

    let mut output = match cli.command {
        Commands::Add { id, name, price } => {
            commands::cart::add(&mut cart, config.locale, &id, &name, &price)?
        }
        Commands::Remove { id } => commands::cart::remove(&mut cart, &id),
        Commands::Set { id, quantity } => commands::cart::set(&mut cart, &id, quantity),
        Commands::Inc { id } => commands::cart::increment(&mut cart, &id),
        Commands::Dec { id } => commands::cart::decrement(&mut cart, &id),
        Commands::Clear => commands::cart::clear(&mut cart),
        Commands::Show => String::new(),
        Commands::Checkout { link } => {
            return Ok(commands::checkout::run(&cart, &config, link)?);
        }
    };

    // Re-render on change notification, or when explicitly asked to show.
    if changed.load(Ordering::SeqCst) || output.is_empty() {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&commands::cart::render(&CartView::new(&cart.summary(), &labels)));
    }

    Ok(output)
}
