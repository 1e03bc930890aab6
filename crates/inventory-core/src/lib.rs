//! # inventory-core: Pure Domain Types for Inventory
//!
//! This crate holds the domain model of the inventory tracker with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Inventory Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    inventory-cli                                │   │
//! │  │    list ──► show ──► add / edit ──► sell / delete              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ inventory-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   draft   │  │   error   │                  │   │
//! │  │   │   Item    │  │ ItemDraft │  │ CoreError │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 inventory-db (Database Layer)                   │   │
//! │  │        SQLite table, DAO, repository, live queries              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - The `Item` entity
//! - [`draft`] - Entry/edit form input and its validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use inventory_core::{Item, ItemDraft};
//!
//! let draft = ItemDraft::new("Widget", "9.99", "5");
//! let item = draft.into_item().unwrap();
//!
//! assert_eq!(item.id, 0); // not persisted yet
//! assert_eq!(item.formatted_price(), "$9.99");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod draft;
pub mod error;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use draft::ItemDraft;
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::{Item, ItemId};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Id carried by an item that has not been written to the store yet.
///
/// The store assigns a fresh id on insert when it sees this value.
pub const UNASSIGNED_ID: ItemId = 0;

/// Currency symbol used when formatting prices.
pub const CURRENCY_SYMBOL: &str = "$";
