//! # Validation Module
//!
//! Input validation for customer and bill submissions.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end (React)                                            │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Submission gate: a failed check means NO network call is made     │
//! │  └── The operation is reported not-attempted, state untouched          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── Authoritative constraints (uniqueness etc.)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::draft::BillDraft;
use crate::error::ValidationError;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer name.
///
/// ## Rules
/// - Must not be empty
/// - At most 100 characters
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customer name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "customer name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - Must not be empty
/// - At most 20 characters
/// - Digits, spaces, `+` and `-` only
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if phone.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "phone".to_string(),
            max: 20,
        });
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '+' || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces, + and -".to_string(),
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// Can be empty (matches everything); at most 100 characters.
/// Returns the trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line-item quantity: positive, at most [`MAX_ITEM_QUANTITY`].
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates an amount in paise: non-negative. Zero is allowed
/// (free alterations, no discount, no advance).
pub fn validate_amount_paise(paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Submission Gates
// =============================================================================

/// Checks a draft is fit to submit: customer name, phone, at least one item,
/// valid rows, non-negative discount and advance.
///
/// The first failure is returned; the caller surfaces it and makes no
/// network call.
pub fn validate_draft(draft: &BillDraft) -> ValidationResult<()> {
    validate_customer_name(&draft.customer_name)?;
    validate_phone(&draft.customer_phone)?;

    if draft.items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    for item in &draft.items {
        if item.name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "item name".to_string(),
            });
        }
        validate_quantity(item.quantity)?;
        validate_amount_paise(item.unit_price.paise())?;
    }

    validate_amount_paise(draft.discount.paise())?;
    validate_amount_paise(draft.advance.paise())?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::LineItem;
    use crate::money::Money;

    fn valid_draft() -> BillDraft {
        let mut draft = BillDraft::new();
        draft.customer_name = "Meera Joshi".to_string();
        draft.customer_phone = "9876543210".to_string();
        draft
            .add_item(LineItem::new("Blouse", 2, Money::from_rupees(500)))
            .unwrap();
        draft
    }

    #[test]
    fn test_validate_customer_name() {
        assert!(validate_customer_name("Meera Joshi").is_ok());
        assert!(validate_customer_name("").is_err());
        assert!(validate_customer_name("   ").is_err());
        assert!(validate_customer_name(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("+91 98765-43210").is_ok());
        assert!(validate_phone("").is_err());
        assert!(validate_phone("not a phone").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_amount_paise() {
        assert!(validate_amount_paise(0).is_ok());
        assert!(validate_amount_paise(50_000).is_ok());
        assert!(validate_amount_paise(-1).is_err());
    }

    #[test]
    fn test_validate_search_query_trims() {
        assert_eq!(validate_search_query("  meera ").unwrap(), "meera");
        assert!(validate_search_query(&"q".repeat(150)).is_err());
    }

    #[test]
    fn test_draft_gate_passes_valid_draft() {
        assert!(validate_draft(&valid_draft()).is_ok());
    }

    #[test]
    fn test_draft_gate_requires_customer_fields() {
        let mut draft = valid_draft();
        draft.customer_name.clear();
        assert!(matches!(
            validate_draft(&draft),
            Err(ValidationError::Required { .. })
        ));

        let mut draft = valid_draft();
        draft.customer_phone.clear();
        assert!(validate_draft(&draft).is_err());
    }

    #[test]
    fn test_draft_gate_requires_at_least_one_item() {
        let mut draft = valid_draft();
        draft.items.clear();
        assert!(matches!(
            validate_draft(&draft),
            Err(ValidationError::Required { field }) if field == "items"
        ));
    }

    #[test]
    fn test_draft_gate_rejects_negative_charge() {
        let mut draft = valid_draft();
        draft.items[0].unit_price = Money::from_rupees(-10);
        assert!(validate_draft(&draft).is_err());
    }
}
