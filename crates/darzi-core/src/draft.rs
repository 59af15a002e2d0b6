//! # Bill Draft
//!
//! The locally editable, pre-submission form state for a bill, and the pure
//! totals arithmetic it is built on.
//!
//! ## Draft Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Bill Draft Lifecycle                               │
//! │                                                                         │
//! │  UI Action                 Draft Operation          Draft Change        │
//! │  ─────────                 ───────────────          ────────────        │
//! │                                                                         │
//! │  Add garment row ────────► add_item() ────────────► items.push(item)   │
//! │                                                                         │
//! │  Edit quantity ──────────► update_quantity() ─────► items[i].qty = n   │
//! │                                                                         │
//! │  Remove row ─────────────► remove_item() ─────────► items.remove(i)    │
//! │                                                                         │
//! │  Generate bill ──────────► (assembler consumes a snapshot; the draft   │
//! │                             is cleared for the next customer)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Totals Invariants
//! - `subtotal = Σ quantity × unit_price`
//! - `total    = max(subtotal − discount, 0)`
//! - `balance  = max(total − advance, 0)`
//!
//! [`compute_subtotal`] deliberately does NOT clamp: callers validate inputs
//! up front, and clamping belongs to the total/balance layer only.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;
use crate::{MAX_BILL_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Garment Catalog
// =============================================================================

/// Garment types offered for quick selection when adding a line item.
/// Free-text item names are also accepted.
pub const GARMENT_TYPES: &[&str] = &[
    "Blouse",
    "Chudidar",
    "Dress",
    "Frock",
    "Kurta",
    "Lehenga",
    "Salwar Kameez",
    "Saree Fall & Pico",
    "Skirt",
    "Alteration",
];

// =============================================================================
// Totals Arithmetic
// =============================================================================

/// Sum of `quantity × unit_price` over all items; zero for an empty list.
///
/// Pure and order-independent. Returns the raw arithmetic result even for
/// negative inputs — no clamping at this layer.
pub fn compute_subtotal(items: &[LineItem]) -> Money {
    items.iter().map(|item| item.line_total()).sum()
}

/// `max(subtotal − discount, 0)`.
pub fn compute_total(subtotal: Money, discount: Money) -> Money {
    subtotal.sub_clamped(discount)
}

/// `max(total − advance, 0)`.
pub fn compute_balance(total: Money, advance: Money) -> Money {
    total.sub_clamped(advance)
}

// =============================================================================
// Line Item
// =============================================================================

/// One garment row on a bill draft.
///
/// Ephemeral: owned by the draft, frozen into the [`crate::types::Bill`] at
/// assembly, discarded when the draft is cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Garment or service name ("Blouse", "Alteration", ...).
    pub name: String,

    /// Number of pieces. Must be positive; validated before submission.
    pub quantity: i64,

    /// Stitching charge per piece.
    pub unit_price: Money,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: i64, unit_price: Money) -> Self {
        LineItem {
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// Line total (`unit_price × quantity`).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Attachments
// =============================================================================

/// Opaque visual references attached to a bill: design photos, measurement
/// drawings, the customer's signature. Data-URL strings passed through to the
/// backend untouched; nothing in this crate decodes them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct Attachments {
    pub design_images: Vec<String>,
    pub drawings: Vec<String>,
    pub signature: Option<String>,
}

impl Attachments {
    pub fn is_empty(&self) -> bool {
        self.design_images.is_empty() && self.drawings.is_empty() && self.signature.is_none()
    }
}

// =============================================================================
// Bill Draft
// =============================================================================

/// The editable form state behind the billing screen.
///
/// ## Invariants
/// - Maximum items: [`MAX_BILL_ITEMS`]
/// - Maximum quantity per item: [`MAX_ITEM_QUANTITY`]
/// - `discount` and `advance` are non-negative (validated at submission)
///
/// Mutated only by the user before submission; assembly consumes a snapshot
/// and the draft is cleared for the next customer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillDraft {
    /// Existing customer this bill is for, when one was selected.
    pub customer_id: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: Option<String>,

    pub items: Vec<LineItem>,

    pub discount: Money,
    pub advance: Money,

    #[ts(as = "Option<String>")]
    pub due_date: Option<chrono::NaiveDate>,
    pub special_instructions: Option<String>,

    pub attachments: Attachments,
}

impl BillDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        BillDraft::default()
    }

    /// Appends a garment row.
    ///
    /// Rows are not merged by name: two "Blouse" rows with different prices
    /// are a normal bill.
    pub fn add_item(&mut self, item: LineItem) -> Result<(), CoreError> {
        if self.items.len() >= MAX_BILL_ITEMS {
            return Err(CoreError::TooManyItems { max: MAX_BILL_ITEMS });
        }
        if item.quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: item.quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Updates the quantity of the row at `index`. Quantity 0 removes it.
    pub fn update_quantity(&mut self, index: usize, quantity: i64) -> Result<(), CoreError> {
        if quantity == 0 {
            return self.remove_item(index);
        }
        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }
        match self.items.get_mut(index) {
            Some(item) => {
                item.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::ItemNotFound { index }),
        }
    }

    /// Removes the row at `index`.
    pub fn remove_item(&mut self, index: usize) -> Result<(), CoreError> {
        if index >= self.items.len() {
            return Err(CoreError::ItemNotFound { index });
        }
        self.items.remove(index);
        Ok(())
    }

    /// Resets the draft for the next customer.
    pub fn clear(&mut self) {
        *self = BillDraft::default();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total garment quantity across all rows.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Subtotal before discount.
    pub fn subtotal(&self) -> Money {
        compute_subtotal(&self.items)
    }

    /// Amount owed after discount.
    pub fn total(&self) -> Money {
        compute_total(self.subtotal(), self.discount)
    }

    /// Amount still owed after the advance payment.
    pub fn balance(&self) -> Money {
        compute_balance(self.total(), self.advance)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn stitching_items() -> Vec<LineItem> {
        vec![
            LineItem::new("Blouse", 2, Money::from_rupees(500)),
            LineItem::new("Saree Fall & Pico", 1, Money::from_rupees(300)),
        ]
    }

    #[test]
    fn test_subtotal_of_empty_list_is_zero() {
        assert!(compute_subtotal(&[]).is_zero());
    }

    #[test]
    fn test_subtotal_is_sum_of_pairwise_products() {
        let items = stitching_items();
        assert_eq!(compute_subtotal(&items), Money::from_rupees(1300));
    }

    #[test]
    fn test_subtotal_is_reorder_invariant() {
        let mut items = stitching_items();
        let forward = compute_subtotal(&items);
        items.reverse();
        assert_eq!(compute_subtotal(&items), forward);
    }

    #[test]
    fn test_subtotal_does_not_clamp_negative_inputs() {
        // Callers validate; this layer reports the raw arithmetic result.
        let items = vec![LineItem::new("Adjustment", 1, Money::from_rupees(-50))];
        assert_eq!(compute_subtotal(&items), Money::from_rupees(-50));
    }

    #[test]
    fn test_total_and_balance_clamp_at_zero() {
        let subtotal = Money::from_rupees(100);
        assert!(compute_total(subtotal, Money::from_rupees(150)).is_zero());
        let total = Money::from_rupees(100);
        assert!(compute_balance(total, Money::from_rupees(500)).is_zero());
    }

    #[test]
    fn test_total_exact_when_discount_within_subtotal() {
        let total = compute_total(Money::from_rupees(1300), Money::from_rupees(100));
        assert_eq!(total, Money::from_rupees(1200));
    }

    #[test]
    fn test_draft_totals_scenario() {
        // 2 × ₹500 + 1 × ₹300, ₹100 discount, ₹400 advance
        let mut draft = BillDraft::new();
        for item in stitching_items() {
            draft.add_item(item).unwrap();
        }
        draft.discount = Money::from_rupees(100);
        draft.advance = Money::from_rupees(400);

        assert_eq!(draft.subtotal(), Money::from_rupees(1300));
        assert_eq!(draft.total(), Money::from_rupees(1200));
        assert_eq!(draft.balance(), Money::from_rupees(800));
        assert_eq!(draft.total_quantity(), 3);
    }

    #[test]
    fn test_totals_are_idempotent() {
        let mut draft = BillDraft::new();
        for item in stitching_items() {
            draft.add_item(item).unwrap();
        }
        assert_eq!(draft.subtotal(), draft.subtotal());
        assert_eq!(draft.balance(), draft.balance());
    }

    #[test]
    fn test_add_item_rejects_oversized_quantity() {
        let mut draft = BillDraft::new();
        let err = draft
            .add_item(LineItem::new("Kurta", MAX_ITEM_QUANTITY + 1, Money::from_rupees(200)))
            .unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
    }

    #[test]
    fn test_update_quantity_zero_removes_row() {
        let mut draft = BillDraft::new();
        draft
            .add_item(LineItem::new("Blouse", 2, Money::from_rupees(500)))
            .unwrap();
        draft.update_quantity(0, 0).unwrap();
        assert!(draft.is_empty());
    }

    #[test]
    fn test_update_quantity_unknown_row() {
        let mut draft = BillDraft::new();
        let err = draft.update_quantity(3, 1).unwrap_err();
        assert!(matches!(err, CoreError::ItemNotFound { index: 3 }));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut draft = BillDraft::new();
        draft.customer_name = "Meera Joshi".to_string();
        draft
            .add_item(LineItem::new("Blouse", 1, Money::from_rupees(500)))
            .unwrap();
        draft.clear();
        assert!(draft.is_empty());
        assert!(draft.customer_name.is_empty());
    }
}
