//! # Domain Types
//!
//! The single persisted entity of the inventory: [`Item`].
//!
//! ## Item Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Item Lifecycle                                 │
//! │                                                                         │
//! │  Item::new("Widget", 9.99, 5)     id = 0 (unassigned)                  │
//! │       │                                                                 │
//! │       ▼ insert                                                          │
//! │  { id: 1, "Widget", 9.99, 5 }     id assigned by the store, immutable  │
//! │       │                                                                 │
//! │       ▼ update (matched by id)                                          │
//! │  { id: 1, "Widget", 9.99, 3 }                                          │
//! │       │                                                                 │
//! │       ▼ delete (matched by id)                                          │
//! │  (gone - no soft delete, no history)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::{CURRENCY_SYMBOL, UNASSIGNED_ID};

/// Store-assigned item identifier (SQLite rowid).
pub type ItemId = i64;

// =============================================================================
// Item
// =============================================================================

/// One row of the `items` table.
///
/// `price` and `quantity` are intended to be non-negative; the store does not
/// enforce it; [`ItemDraft`](crate::ItemDraft) does at the input boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Item {
    /// Unique identifier. `0` until the item is persisted.
    pub id: ItemId,

    /// Display name.
    pub name: String,

    /// Unit price.
    pub price: f64,

    /// Units currently in stock.
    pub quantity: i64,
}

impl Item {
    /// Creates an item that has not been persisted yet.
    pub fn new(name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Item {
            id: UNASSIGNED_ID,
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Returns a copy of this item carrying the given id.
    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = id;
        self
    }

    /// Whether the store has assigned an id to this item.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id != UNASSIGNED_ID
    }

    /// Whether at least one unit is in stock.
    #[inline]
    pub fn is_in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Formats the price as a currency string with two decimals.
    ///
    /// ## Example
    /// ```rust
    /// use inventory_core::Item;
    ///
    /// assert_eq!(Item::new("Anvil", 49.99, 2).formatted_price(), "$49.99");
    /// assert_eq!(Item::new("Refund", -1.5, 0).formatted_price(), "-$1.50");
    /// ```
    pub fn formatted_price(&self) -> String {
        let sign = if self.price < 0.0 { "-" } else { "" };
        format!("{}{}{:.2}", sign, CURRENCY_SYMBOL, self.price.abs())
    }

    /// Returns the item with one unit sold.
    ///
    /// ## Errors
    /// `CoreError::OutOfStock` when nothing is left to sell; quantity never
    /// goes below zero.
    pub fn sold_one(&self) -> CoreResult<Item> {
        if !self.is_in_stock() {
            return Err(CoreError::OutOfStock {
                name: self.name.clone(),
            });
        }

        Ok(Item {
            quantity: self.quantity - 1,
            ..self.clone()
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
