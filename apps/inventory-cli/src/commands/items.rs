//! # Item Commands
//!
//! The list / details / entry / edit / sell / delete flows of the app.
//!
//! ## Edit Flow
//! ```text
//! inventory edit 1 --quantity 3
//!      │
//!      ▼
//! current item ──► parse + validate only the given fields
//!      │
//!      ▼
//! stored values for the rest ──► repo.update_item()
//! ```
//!
//! Stored values are written back as they are, so a row the store accepted
//! with a negative quantity can still be renamed.

use std::io::Write;
use tracing::{debug, info};

use inventory_core::draft::{parse_price, parse_quantity, validate_name};
use inventory_core::{CoreError, Item, ItemDraft, ItemId};
use inventory_db::ItemsRepository;

use super::{current, Printer};
use crate::error::CliResult;

/// Loads the current state of one item or fails with `ItemNotFound`.
async fn require(repo: &dyn ItemsRepository, id: ItemId) -> CliResult<Item> {
    current(repo.get_item_stream(id))
        .await?
        .ok_or_else(|| CoreError::ItemNotFound(id).into())
}

pub async fn list<W: Write>(repo: &dyn ItemsRepository, printer: &mut Printer<W>) -> CliResult<()> {
    let items = current(repo.get_all_items_stream()).await?;
    debug!(count = items.len(), "Listing items");
    printer.items(&items)
}

pub async fn show<W: Write>(
    repo: &dyn ItemsRepository,
    printer: &mut Printer<W>,
    id: ItemId,
) -> CliResult<()> {
    let item = require(repo, id).await?;
    printer.item(&item)
}

/// Validates the entry form and inserts the item.
pub async fn add<W: Write>(
    repo: &dyn ItemsRepository,
    printer: &mut Printer<W>,
    name: String,
    price: String,
    quantity: String,
) -> CliResult<()> {
    let item = ItemDraft::new(name, price, quantity).into_item()?;

    match repo.insert_item(&item).await? {
        Some(id) => {
            info!(id, name = %item.name, "Item added");
            printer.item(&item.with_id(id))
        }
        None => printer.message("Item already exists; nothing written"),
    }
}

pub async fn edit<W: Write>(
    repo: &dyn ItemsRepository,
    printer: &mut Printer<W>,
    id: ItemId,
    name: Option<String>,
    price: Option<String>,
    quantity: Option<String>,
) -> CliResult<()> {
    let mut edited = require(repo, id).await?;

    if let Some(name) = name {
        validate_name(&name)?;
        edited.name = name.trim().to_string();
    }
    if let Some(price) = price {
        edited.price = parse_price(&price)?;
    }
    if let Some(quantity) = quantity {
        edited.quantity = parse_quantity(&quantity)?;
    }

    if repo.update_item(&edited).await? == 0 {
        // Deleted between the read and the write.
        return Err(CoreError::ItemNotFound(id).into());
    }

    info!(id, "Item updated");
    printer.item(&edited)
}

/// Reduces the quantity by one; refuses when out of stock.
pub async fn sell<W: Write>(
    repo: &dyn ItemsRepository,
    printer: &mut Printer<W>,
    id: ItemId,
) -> CliResult<()> {
    // Read-then-write: two concurrent sells of the same item can both write
    // the same remaining quantity, losing one sale.
    let stored = require(repo, id).await?;
    let sold = stored.sold_one()?;

    if repo.update_item(&sold).await? == 0 {
        return Err(CoreError::ItemNotFound(id).into());
    }

    info!(id, remaining = sold.quantity, "Sold one unit");
    printer.item(&sold)
}

/// Deletes by id. A missing id is reported but is not an error.
pub async fn delete<W: Write>(
    repo: &dyn ItemsRepository,
    printer: &mut Printer<W>,
    id: ItemId,
) -> CliResult<()> {
    // Only the id matters for matching the row.
    let target = Item::new(String::new(), 0.0, 0).with_id(id);

    if repo.delete_item(&target).await? == 0 {
        return printer.message(&format!("No item with id {id}; nothing deleted"));
    }

    info!(id, "Item deleted");
    printer.message(&format!("Deleted item {id}"))
}
