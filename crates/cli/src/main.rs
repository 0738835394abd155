//! Techstore CLI - drive the shopping cart from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Add a product by hand
//! cart add --id A --name "ThinkPad X1" --price 1499.00 --stock 3
//!
//! # Add products exported from the catalog (one object or an array)
//! cart add --from-file products.json
//!
//! # Change quantities
//! cart set A 2
//! cart decrement A
//! cart remove A
//!
//! # Inspect and check out
//! cart show
//! cart show --json
//! cart checkout
//! ```
//!
//! # Environment Variables
//!
//! See `techstore_cart::config` for `TECHSTORE_CART_DIR`,
//! `TECHSTORE_CART_KEY` and `TECHSTORE_CART_PERSIST`. Log verbosity follows
//! `RUST_LOG`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use techstore_cart::{CartConfig, CartStore};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "cart")]
#[command(author, version, about = "Techstore shopping cart")]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product
    Add {
        /// Product id
        #[arg(long, required_unless_present = "from_file")]
        id: Option<String>,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Unit price (number or numeric string)
        #[arg(long)]
        price: Option<String>,

        /// Image URL
        #[arg(long)]
        image: Option<String>,

        /// Short description
        #[arg(long)]
        description: Option<String>,

        /// Available stock
        #[arg(long)]
        stock: Option<u32>,

        /// Read product descriptors from a JSON file instead
        #[arg(long, conflicts_with_all = ["id", "name", "price", "image", "description", "stock"])]
        from_file: Option<PathBuf>,
    },
    /// Set a line's quantity (0 or below removes it)
    Set {
        /// Product id
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line entirely
    Remove {
        /// Product id
        id: String,
    },
    /// Take one unit off a line
    Decrement {
        /// Product id
        id: String,
    },
    /// Empty the cart
    Clear,
    /// Print the cart
    Show {
        /// Print the persisted JSON shape instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Confirm the order and empty the cart
    Checkout,
}

fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "techstore_cart=info,techstore_cli=info".into());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    let mut store = CartStore::from_config(&config);
    if store.load_persisted() {
        tracing::debug!(items = store.distinct_items(), "Restored cart");
    }

    match cli.command {
        Commands::Add {
            id,
            name,
            price,
            image,
            description,
            stock,
            from_file,
        } => match from_file {
            Some(path) => {
                commands::import::from_file(&mut store, &path)?;
            }
            None => {
                let product = commands::cart::descriptor_from_args(
                    id,
                    name,
                    price,
                    image,
                    description,
                    stock,
                );
                commands::cart::add(&mut store, &product);
            }
        },
        Commands::Set { id, quantity } => commands::cart::set(&mut store, &id, quantity),
        Commands::Remove { id } => commands::cart::remove(&mut store, &id),
        Commands::Decrement { id } => commands::cart::decrement(&mut store, &id),
        Commands::Clear => commands::cart::clear(&mut store),
        Commands::Show { json } => {
            if json {
                output::print_json(store.state())?;
            } else {
                output::print_cart(&store.view());
            }
        }
        Commands::Checkout => {
            let confirmation = commands::cart::checkout(&mut store);
            output::print_confirmation(&confirmation);
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_with_flags() {
        let cli = Cli::try_parse_from(["cart", "add", "--id", "A", "--price", "299.99"]).unwrap();
        match cli.command {
            Commands::Add { id, price, .. } => {
                assert_eq!(id.as_deref(), Some("A"));
                assert_eq!(price.as_deref(), Some("299.99"));
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_add_requires_id_or_file() {
        assert!(Cli::try_parse_from(["cart", "add", "--price", "5"]).is_err());
        assert!(Cli::try_parse_from(["cart", "add", "--from-file", "p.json"]).is_ok());
        assert!(
            Cli::try_parse_from(["cart", "add", "--id", "A", "--from-file", "p.json"]).is_err()
        );
    }

    #[test]
    fn test_parse_set_negative_quantity() {
        let cli = Cli::try_parse_from(["cart", "set", "A", "-2"]).unwrap();
        assert!(matches!(cli.command, Commands::Set { quantity: -2, .. }));
    }

    #[test]
    fn test_parse_log_format() {
        let cli = Cli::try_parse_from(["cart", "show", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(matches!(cli.command, Commands::Show { json: false }));
    }
}
