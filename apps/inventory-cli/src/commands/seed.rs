//! # Seed Command
//!
//! Populates an empty database with sample items for development.
//!
//! ## Usage
//! ```bash
//! inventory seed            # 20 items
//! inventory seed --count 200
//! ```
//!
//! Each item gets a name from `NAMES` combined with a size, a price between
//! $0.99 and $19.98 and a quantity between 0 and 100. Values are derived from
//! the item index, so two seeded databases hold the same data.

use std::io::Write;
use std::time::Instant;
use tracing::{info, warn};

use inventory_core::Item;
use inventory_db::ItemsRepository;

use super::{current, Printer};
use crate::error::CliResult;

const NAMES: &[&str] = &[
    "Anvil",
    "Bolt",
    "Bracket",
    "Clamp",
    "Drill Bit",
    "Gasket",
    "Hinge",
    "Nail",
    "Nut",
    "Pulley",
    "Rivet",
    "Screw",
    "Spring",
    "Washer",
    "Widget",
];

const SIZES: &[&str] = &["Small", "Medium", "Large", "XL"];

pub async fn seed<W: Write>(
    repo: &dyn ItemsRepository,
    printer: &mut Printer<W>,
    count: usize,
) -> CliResult<()> {
    let existing = current(repo.get_all_items_stream()).await?.len();
    if existing > 0 {
        warn!(existing, "Database is not empty, skipping seed");
        return printer.message(&format!(
            "Database already has {existing} items; skipping seed"
        ));
    }

    let start = Instant::now();
    let mut generated = 0usize;

    for index in 0..count {
        let item = generate_item(index);
        if repo.insert_item(&item).await?.is_some() {
            generated += 1;
        }
    }

    info!(
        generated,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Seed complete"
    );
    printer.message(&format!("Generated {generated} items"))
}

/// Builds the `index`-th sample item.
fn generate_item(index: usize) -> Item {
    let name = NAMES[index % NAMES.len()];
    let size = SIZES[(index / NAMES.len()) % SIZES.len()];

    // $0.99 - $19.98
    let price_cents = 99 + (index * 17) % 1900;
    let quantity = (index % 101) as i64;

    Item::new(format!("{name} {size}"), price_cents as f64 / 100.0, quantity)
}
