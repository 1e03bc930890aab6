//! # Commands Module
//!
//! Every subcommand of the `inventory` binary.
//!
//! ## Command Organization
//! - [`items`] - list, show, add, edit, sell, delete
//! - [`watch`] - live list until interrupted
//! - [`seed`] - sample data for development
//!
//! Commands only see `dyn ItemsRepository`; they never touch SQL.

pub mod items;
pub mod seed;
pub mod watch;

use clap::Subcommand;
use futures::stream::BoxStream;
use futures::StreamExt;
use serde_json::json;
use std::future::Future;
use std::io::Write;

use inventory_core::{Item, ItemId};
use inventory_db::{DbResult, ItemsRepository};

use crate::error::{CliError, CliResult};

/// Subcommands of the `inventory` binary.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all items sorted by name
    List,

    /// Show one item
    Show { id: ItemId },

    /// Add a new item
    Add {
        name: String,
        #[arg(allow_hyphen_values = true)]
        price: String,
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },

    /// Change fields of an existing item
    Edit {
        id: ItemId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        price: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        quantity: Option<String>,
    },

    /// Sell one unit of an item
    Sell { id: ItemId },

    /// Delete an item
    Delete { id: ItemId },

    /// Print the list again every time it changes (Ctrl-C to stop)
    Watch {
        /// Stop after this many lists have been printed
        #[arg(long)]
        updates: Option<usize>,
    },

    /// Fill an empty database with sample items
    Seed {
        #[arg(long, short, default_value_t = 20)]
        count: usize,
    },
}

/// Runs one command against the repository.
///
/// `shutdown` only matters for `watch`, which stops when it resolves.
pub async fn execute<W: Write>(
    command: Command,
    repo: &dyn ItemsRepository,
    printer: &mut Printer<W>,
    shutdown: impl Future<Output = ()>,
) -> CliResult<()> {
    match command {
        Command::List => items::list(repo, printer).await,
        Command::Show { id } => items::show(repo, printer, id).await,
        Command::Add {
            name,
            price,
            quantity,
        } => items::add(repo, printer, name, price, quantity).await,
        Command::Edit {
            id,
            name,
            price,
            quantity,
        } => items::edit(repo, printer, id, name, price, quantity).await,
        Command::Sell { id } => items::sell(repo, printer, id).await,
        Command::Delete { id } => items::delete(repo, printer, id).await,
        Command::Watch { updates } => watch::watch(repo, printer, updates, shutdown).await,
        Command::Seed { count } => seed::seed(repo, printer, count).await,
    }
}

/// First value of a live stream: the current state of the store.
pub(crate) async fn current<T>(mut stream: BoxStream<'static, DbResult<T>>) -> CliResult<T> {
    let value = stream.next().await.ok_or(CliError::StreamClosed)??;
    Ok(value)
}

// =============================================================================
// Output
// =============================================================================

/// Renders items either as an aligned table or as JSON.
#[derive(Debug)]
pub struct Printer<W> {
    out: W,
    json: bool,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, json: bool) -> Self {
        Printer { out, json }
    }

    /// Prints a full item list.
    pub fn items(&mut self, items: &[Item]) -> CliResult<()> {
        if self.json {
            serde_json::to_writer(&mut self.out, items)?;
            writeln!(self.out)?;
            return Ok(());
        }

        if items.is_empty() {
            writeln!(self.out, "No items in inventory")?;
            return Ok(());
        }

        writeln!(self.out, "{:>4}  {:<24}  {:>10}  {:>5}", "ID", "NAME", "PRICE", "QTY")?;
        for item in items {
            self.row(item)?;
        }
        Ok(())
    }

    /// Prints a single item.
    pub fn item(&mut self, item: &Item) -> CliResult<()> {
        if self.json {
            serde_json::to_writer(&mut self.out, item)?;
            writeln!(self.out)?;
            return Ok(());
        }

        writeln!(self.out, "Item #{}", item.id)?;
        writeln!(self.out, "  Name:     {}", item.name)?;
        writeln!(self.out, "  Price:    {}", item.formatted_price())?;
        writeln!(self.out, "  Quantity: {}", item.quantity)?;
        if !item.is_in_stock() {
            writeln!(self.out, "  (out of stock)")?;
        }
        Ok(())
    }

    /// Prints a status line.
    pub fn message(&mut self, text: &str) -> CliResult<()> {
        if self.json {
            serde_json::to_writer(&mut self.out, &json!({ "message": text }))?;
            writeln!(self.out)?;
        } else {
            writeln!(self.out, "{text}")?;
        }
        Ok(())
    }

    /// Separates consecutive outputs of a live command.
    pub fn separator(&mut self) -> CliResult<()> {
        if !self.json {
            writeln!(self.out)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> CliResult<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn row(&mut self, item: &Item) -> CliResult<()> {
        writeln!(
            self.out,
            "{:>4}  {:<24}  {:>10}  {:>5}",
            item.id,
            item.name,
            item.formatted_price(),
            item.quantity
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(json: bool, f: impl FnOnce(&mut Printer<Vec<u8>>) -> CliResult<()>) -> String {
        let mut printer = Printer::new(Vec::new(), json);
        f(&mut printer).unwrap();
        String::from_utf8(printer.into_inner()).unwrap()
    }

    #[test]
    fn test_table_output() {
        let items = vec![
            Item::new("Anvil", 49.99, 2).with_id(2),
            Item::new("Widget", 9.99, 5).with_id(1),
        ];
        let text = render(false, |p| p.items(&items));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("NAME"));
        assert!(lines[1].contains("Anvil") && lines[1].contains("$49.99"));
        assert!(lines[2].contains("Widget") && lines[2].contains("$9.99"));
    }

    #[test]
    fn test_empty_list_message() {
        assert_eq!(render(false, |p| p.items(&[])), "No items in inventory\n");
        assert_eq!(render(true, |p| p.items(&[])), "[]\n");
    }

    #[test]
    fn test_json_item() {
        let text = render(true, |p| p.item(&Item::new("Widget", 9.99, 5).with_id(1)));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["name"], "Widget");
        assert_eq!(value["quantity"], 5);
    }

    #[test]
    fn test_out_of_stock_marker() {
        let text = render(false, |p| p.item(&Item::new("Widget", 9.99, 0).with_id(1)));
        assert!(text.contains("(out of stock)"));
    }
}
