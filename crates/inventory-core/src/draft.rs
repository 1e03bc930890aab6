//! # Item Drafts
//!
//! Raw entry/edit form input and the rules for turning it into an [`Item`].
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Input (CLI arguments / form fields)                          │
//! │  └── THIS MODULE: blank checks, number parsing, non-negative           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  └── NOT NULL constraints only                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use inventory_core::ItemDraft;
//!
//! assert!(ItemDraft::new("Widget", "9.99", "5").validate().is_ok());
//! assert!(ItemDraft::new("", "9.99", "5").validate().is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{Item, ItemId};
use crate::UNASSIGNED_ID;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Unvalidated item fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    /// Id of the item being edited, `0` for a new entry.
    pub id: ItemId,
    pub name: String,
    pub price: String,
    pub quantity: String,
}

impl ItemDraft {
    /// Creates a draft for a new item.
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        ItemDraft {
            id: UNASSIGNED_ID,
            name: name.into(),
            price: price.into(),
            quantity: quantity.into(),
        }
    }

    /// Checks every field without consuming the draft.
    ///
    /// ## Rules
    /// - name must not be blank
    /// - price must be a finite number `>= 0`
    /// - quantity must be an integer `>= 0`
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name(&self.name)?;
        parse_price(&self.price)?;
        parse_quantity(&self.quantity)?;
        Ok(())
    }

    /// Validates the draft and converts it into an [`Item`].
    pub fn into_item(self) -> ValidationResult<Item> {
        validate_name(&self.name)?;
        let price = parse_price(&self.price)?;
        let quantity = parse_quantity(&self.quantity)?;

        Ok(Item {
            id: self.id,
            name: self.name.trim().to_string(),
            price,
            quantity,
        })
    }
}

impl From<&Item> for ItemDraft {
    /// Pre-fills an edit form from a stored item.
    fn from(item: &Item) -> Self {
        ItemDraft {
            id: item.id,
            name: item.name.clone(),
            price: item.price.to_string(),
            quantity: item.quantity.to_string(),
        }
    }
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates an item name (must not be blank).
pub fn validate_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::required("name"));
    }
    Ok(())
}

/// Parses a price field.
pub fn parse_price(raw: &str) -> ValidationResult<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::required("price"));
    }

    let price: f64 = raw
        .parse()
        .map_err(|_| ValidationError::invalid_number("price", raw))?;

    if !price.is_finite() {
        return Err(ValidationError::invalid_number("price", raw));
    }
    if price < 0.0 {
        return Err(ValidationError::negative("price"));
    }

    Ok(price)
}

/// Parses a quantity field.
pub fn parse_quantity(raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::required("quantity"));
    }

    let quantity: i64 = raw
        .parse()
        .map_err(|_| ValidationError::invalid_number("quantity", raw))?;

    if quantity < 0 {
        return Err(ValidationError::negative("quantity"));
    }

    Ok(quantity)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_draft_converts() {
        let item = ItemDraft::new("  Widget ", "9.99", "5").into_item().unwrap();
        assert_eq!(item, Item::new("Widget", 9.99, 5));
    }

    #[test]
    fn test_blank_fields_are_required() {
        assert_eq!(
            ItemDraft::new("   ", "1", "1").validate(),
            Err(ValidationError::required("name"))
        );
        assert_eq!(
            ItemDraft::new("Widget", "", "1").validate(),
            Err(ValidationError::required("price"))
        );
        assert_eq!(
            ItemDraft::new("Widget", "1", " ").validate(),
            Err(ValidationError::required("quantity"))
        );
    }

    #[test]
    fn test_rejects_bad_numbers() {
        assert!(matches!(
            parse_price("abc"),
            Err(ValidationError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_price("NaN"),
            Err(ValidationError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_quantity("2.5"),
            Err(ValidationError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_values() {
        assert_eq!(parse_price("-0.01"), Err(ValidationError::negative("price")));
        assert_eq!(parse_quantity("-1"), Err(ValidationError::negative("quantity")));
        assert_eq!(parse_quantity("0"), Ok(0));
    }

    #[test]
    fn test_edit_form_keeps_id() {
        let stored = Item::new("Widget", 9.99, 5).with_id(3);
        let mut draft = ItemDraft::from(&stored);
        assert_eq!(draft.price, "9.99");
        assert_eq!(draft.quantity, "5");

        draft.quantity = "3".to_string();
        let edited = draft.into_item().unwrap();
        assert_eq!(edited.id, 3);
        assert_eq!(edited.quantity, 3);
    }
}
