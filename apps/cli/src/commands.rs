//! # Commands
//!
//! Parses one input line into a [`Command`] and runs it against the store.
//!
//! ## Command Reference
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Input line                                        Store operation      │
//! │  ──────────                                        ───────────────      │
//! │  add <kind> <id> <price> <qty> <extra> <name...>   add_product          │
//! │      kind:  food | electronics                                          │
//! │      extra: YYYY-MM-DD (food) or warranty months (electronics)          │
//! │  remove <id>                                       remove_product       │
//! │  list                                              all_products         │
//! │  search <text...>                                  search_by_name       │
//! │  analytics                                         total_value + counts │
//! │  expired                                           expired_food_products│
//! │  reload                                            try_load_data        │
//! │  help                                                                   │
//! │  quit | exit                                       shutdown             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write as _;

use warehouse_core::{parse_product_id, Product, ProductForm};
use warehouse_store::Warehouse;

use crate::error::CliError;

pub const HELP: &str = "\
Commands:
  add <food|electronics> <id> <price> <qty> <date|months> <name...>
  remove <id>
  list
  search <text...>
  analytics
  expired
  reload
  help
  quit";

// =============================================================================
// Parsing
// =============================================================================

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Raw fields; converted to a record when executed.
    Add(ProductForm),
    Remove(String),
    List,
    Search(String),
    Analytics,
    Expired,
    Reload,
    Help,
    Quit,
}

impl Command {
    /// Parses a line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, CliError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match verb.to_lowercase().as_str() {
            "add" => {
                if args.len() < 6 {
                    return Err(CliError::usage(
                        "add <food|electronics> <id> <price> <qty> <date|months> <name...>",
                    ));
                }
                Command::Add(ProductForm {
                    kind: args[0].to_string(),
                    id: args[1].to_string(),
                    price: args[2].to_string(),
                    quantity: args[3].to_string(),
                    extra: args[4].to_string(),
                    name: args[5..].join(" "),
                })
            }
            "remove" | "rm" => match args.as_slice() {
                [id] => Command::Remove(id.to_string()),
                _ => return Err(CliError::usage("remove <id>")),
            },
            "search" => {
                if args.is_empty() {
                    return Err(CliError::usage("search <text...>"));
                }
                Command::Search(args.join(" "))
            }
            "list" | "ls" => Command::List,
            "analytics" | "stats" => Command::Analytics,
            "expired" => Command::Expired,
            "reload" => Command::Reload,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => {
                return Err(CliError::usage(format!(
                    "Unknown command '{other}'. Type 'help' for a list"
                )))
            }
        };

        Ok(Some(command))
    }
}

// =============================================================================
// Execution
// =============================================================================

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

/// Runs a command. Validation happens before the store is touched.
pub fn execute(warehouse: &Warehouse, command: Command) -> Result<Reply, CliError> {
    let text = match command {
        Command::Add(form) => {
            let product = form.parse()?;
            let line = product.to_string();
            warehouse.add_product(product);
            format!("Added {line}")
        }
        Command::Remove(id) => {
            let id = parse_product_id(&id)?;
            let before = warehouse.len();
            warehouse.remove_product(id);
            match before - warehouse.len() {
                0 => format!("No product with id {id}"),
                n => format!("Removed {n} product(s) with id {id}"),
            }
        }
        Command::List => render_products(&warehouse.all_products(), "Warehouse is empty"),
        Command::Search(query) => render_products(
            &warehouse.search_by_name(&query),
            &format!("No products match '{query}'"),
        ),
        Command::Analytics => render_analytics(warehouse),
        Command::Expired => {
            let expired = warehouse.expired_food_products();
            if expired.is_empty() {
                "No expired products".to_string()
            } else {
                let mut out = format!("Expired products: {}", expired.len());
                for food in &expired {
                    let _ = write!(out, "\n  {food}");
                }
                out
            }
        }
        Command::Reload => {
            let count = warehouse.try_load_data()?;
            format!(
                "Loaded {count} product(s) from {}",
                warehouse.data_path().display()
            )
        }
        Command::Help => HELP.to_string(),
        Command::Quit => return Ok(Reply::Quit),
    };

    Ok(Reply::Text(text))
}

fn render_products(products: &[Product], empty: &str) -> String {
    if products.is_empty() {
        return empty.to_string();
    }
    products
        .iter()
        .map(Product::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_analytics(warehouse: &Warehouse) -> String {
    let mut out = format!(
        "Products: {}\nTotal value: {:.2}",
        warehouse.len(),
        warehouse.total_value()
    );
    for (label, count) in warehouse.product_type_counts() {
        let _ = write!(out, "\n  {label}: {count}");
    }
    out
}

// =============================================================================
// Tests
// =============================================================================
