//! # Bill Assembly
//!
//! Builds the final [`Bill`] from a locally held [`BillDraft`] plus the
//! backend's bill-creation response, without losing locally entered data the
//! backend does not echo back.
//!
//! ## Response Normalization
//! Creation responses have drifted across backend revisions. The differences
//! are contained here, in one normalization step, so the rest of the code
//! never sees them:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Accepted Response Shapes                               │
//! │                                                                         │
//! │  { "bill": { ... } }        record nested under a "bill" key            │
//! │  { ... }                    record at the top level                     │
//! │                                                                         │
//! │  "bill_no_str": "007"       pre-formatted display number (verbatim)     │
//! │  "billNoStr":  "007"        camel-case variant (verbatim)               │
//! │  "bill_no":    7            raw sequence → zero-padded, width 3         │
//! │  (none)                     display number pending assignment           │
//! │                                                                         │
//! │  "qr_code" / "qrCode"       opaque QR payload, carried through          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A partial response is never an error: every server field degrades to
//! `None` and the presentation layer shows "pending assignment".

use chrono::NaiveDate;
use serde_json::Value;

use crate::draft::{compute_balance, compute_subtotal, compute_total, BillDraft};
use crate::types::{Bill, BillStatus};
use crate::BILL_NUMBER_DISPLAY_WIDTH;

// =============================================================================
// Bill Number
// =============================================================================

/// Server-assigned bill number in the two forms it arrives in.
///
/// A pre-formatted display string is used verbatim and never re-derived;
/// a raw sequence is rendered zero-padded to [`BILL_NUMBER_DISPLAY_WIDTH`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillNumber {
    /// Pre-formatted display string, e.g. `"007"`.
    Display(String),
    /// Raw sequence number, e.g. `7`.
    Sequence(i64),
}

impl BillNumber {
    /// The stable display string, e.g. `7` → `"007"`, `123` → `"123"`.
    pub fn display(&self) -> String {
        match self {
            BillNumber::Display(s) => s.clone(),
            BillNumber::Sequence(n) => format!("{:0width$}", n, width = BILL_NUMBER_DISPLAY_WIDTH),
        }
    }
}

// =============================================================================
// Created Bill Record
// =============================================================================

/// The normalized view of a bill-creation response.
///
/// All fields are optional: the backend owes us an id, but a partial or
/// ambiguous response degrades gracefully instead of failing the merge.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedBillRecord {
    pub id: Option<String>,
    pub bill_number: Option<BillNumber>,
    pub qr_code: Option<String>,
}

impl CreatedBillRecord {
    /// Normalizes a raw creation response.
    ///
    /// The record may sit under a `"bill"` key or at the top level; the id is
    /// also looked up at the top level because older backends echoed it there
    /// even when nesting the record.
    pub fn from_response(response: &Value) -> Self {
        let record = match response.get("bill") {
            Some(nested) if nested.is_object() => nested,
            _ => response,
        };

        let id = string_field(record, &["_id", "id"])
            .or_else(|| string_field(response, &["_id", "id"]));

        let bill_number = string_field(record, &["bill_no_str", "billNoStr"])
            .map(BillNumber::Display)
            .or_else(|| sequence_field(record, "bill_no").map(BillNumber::Sequence));

        let qr_code = string_field(record, &["qr_code", "qrCode"]);

        CreatedBillRecord {
            id,
            bill_number,
            qr_code,
        }
    }
}

/// First non-empty string among the named fields. A field that is present
/// but null, empty or non-string falls through to the next candidate.
fn string_field(value: &Value, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| value.get(name))
        .filter_map(Value::as_str)
        .find(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Raw sequence numbers arrive as JSON numbers, occasionally as numeric
/// strings from older backends.
fn sequence_field(value: &Value, name: &str) -> Option<i64> {
    match value.get(name)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// =============================================================================
// Assembly
// =============================================================================

/// Merges a draft with the normalized creation response into a [`Bill`].
///
/// Totals are recomputed from the draft rather than trusting an echoed total:
/// the creation call may race with local edits made while it was in flight.
/// The QR payload is carried through verbatim whenever supplied — whether to
/// *show* a payment affordance is decided at presentation time from the
/// balance computed here.
///
/// Pure and idempotent: the same draft and response always assemble the same
/// bill.
pub fn assemble_bill(draft: &BillDraft, created: &CreatedBillRecord, created_date: NaiveDate) -> Bill {
    let subtotal = compute_subtotal(&draft.items);
    let total = compute_total(subtotal, draft.discount);
    let balance = compute_balance(total, draft.advance);

    Bill {
        id: created.id.clone(),
        bill_number: created.bill_number.as_ref().map(BillNumber::display),
        customer_id: draft.customer_id.clone(),
        customer_name: draft.customer_name.clone(),
        customer_phone: draft.customer_phone.clone(),
        customer_address: draft.customer_address.clone(),
        items: draft.items.clone(),
        subtotal,
        discount: draft.discount,
        total,
        advance: draft.advance,
        balance,
        due_date: draft.due_date,
        special_instructions: draft.special_instructions.clone(),
        attachments: draft.attachments.clone(),
        created_date,
        status: BillStatus::Pending,
        qr_code: created.qr_code.clone(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::LineItem;
    use crate::money::Money;
    use serde_json::json;

    fn sample_draft() -> BillDraft {
        let mut draft = BillDraft::new();
        draft.customer_name = "Meera Joshi".to_string();
        draft.customer_phone = "9876543210".to_string();
        draft
            .add_item(LineItem::new("Blouse", 2, Money::from_rupees(500)))
            .unwrap();
        draft
            .add_item(LineItem::new("Saree Fall & Pico", 1, Money::from_rupees(300)))
            .unwrap();
        draft.discount = Money::from_rupees(100);
        draft.advance = Money::from_rupees(400);
        draft
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    fn test_preformatted_string_used_verbatim() {
        let record = CreatedBillRecord::from_response(&json!({
            "_id": "abc123",
            "bill_no_str": "0042",
            "bill_no": 42
        }));
        // The string field wins and is never re-derived from the sequence
        assert_eq!(record.bill_number, Some(BillNumber::Display("0042".into())));
        assert_eq!(record.bill_number.unwrap().display(), "0042");
    }

    #[test]
    fn test_null_or_empty_string_field_falls_through() {
        let record = CreatedBillRecord::from_response(&json!({
            "bill_no_str": null,
            "billNoStr": "019"
        }));
        assert_eq!(record.bill_number.unwrap().display(), "019");

        let record = CreatedBillRecord::from_response(&json!({
            "bill_no_str": "",
            "bill_no": 19
        }));
        assert_eq!(record.bill_number.unwrap().display(), "019");
    }

    #[test]
    fn test_camel_case_variant_accepted() {
        let record = CreatedBillRecord::from_response(&json!({ "billNoStr": "017" }));
        assert_eq!(record.bill_number.unwrap().display(), "017");
    }

    #[test]
    fn test_raw_sequence_is_zero_padded() {
        for (raw, expected) in [(7, "007"), (42, "042"), (123, "123"), (1234, "1234")] {
            let record = CreatedBillRecord::from_response(&json!({ "bill_no": raw }));
            assert_eq!(record.bill_number.unwrap().display(), expected);
        }
    }

    #[test]
    fn test_numeric_string_sequence_accepted() {
        let record = CreatedBillRecord::from_response(&json!({ "bill_no": "7" }));
        assert_eq!(record.bill_number, Some(BillNumber::Sequence(7)));
    }

    #[test]
    fn test_record_nested_under_bill_key() {
        let record = CreatedBillRecord::from_response(&json!({
            "bill": { "_id": "inner", "bill_no": 7, "qr_code": "data:image/png;base64,QQ==" }
        }));
        assert_eq!(record.id.as_deref(), Some("inner"));
        assert_eq!(record.bill_number.unwrap().display(), "007");
        assert!(record.qr_code.is_some());
    }

    #[test]
    fn test_id_falls_back_to_top_level() {
        let record = CreatedBillRecord::from_response(&json!({
            "_id": "outer",
            "bill": { "bill_no": 9 }
        }));
        assert_eq!(record.id.as_deref(), Some("outer"));
    }

    #[test]
    fn test_missing_fields_degrade_to_none() {
        let record = CreatedBillRecord::from_response(&json!({ "ok": true }));
        assert_eq!(record.id, None);
        assert_eq!(record.bill_number, None);
        assert_eq!(record.qr_code, None);
    }

    #[test]
    fn test_assemble_recomputes_totals_from_draft() {
        let draft = sample_draft();
        // Stale echoed totals must be ignored; only identity fields are read
        let record = CreatedBillRecord::from_response(&json!({
            "_id": "abc123",
            "bill_no": 7,
            "total": 1,
            "balance": 999999
        }));
        let bill = assemble_bill(&draft, &record, date());

        assert_eq!(bill.subtotal, Money::from_rupees(1300));
        assert_eq!(bill.total, Money::from_rupees(1200));
        assert_eq!(bill.balance, Money::from_rupees(800));
        assert_eq!(bill.bill_number.as_deref(), Some("007"));
        assert_eq!(bill.status, BillStatus::Pending);
    }

    #[test]
    fn test_assemble_is_idempotent() {
        let draft = sample_draft();
        let record = CreatedBillRecord::from_response(&json!({ "_id": "x", "bill_no": 12 }));
        let first = assemble_bill(&draft, &record, date());
        let second = assemble_bill(&draft, &record, date());
        assert_eq!(first, second);
    }

    #[test]
    fn test_qr_carried_through_even_at_zero_balance() {
        let mut draft = sample_draft();
        draft.advance = Money::from_rupees(5000); // over-paid, balance clamps to 0
        let record = CreatedBillRecord::from_response(&json!({
            "_id": "x",
            "qr_code": "data:image/png;base64,QQ=="
        }));
        let bill = assemble_bill(&draft, &record, date());
        assert!(bill.balance.is_zero());
        // Carried verbatim; suppression is the presentation layer's call
        assert_eq!(bill.qr_code.as_deref(), Some("data:image/png;base64,QQ=="));
    }

    #[test]
    fn test_assemble_preserves_local_only_fields() {
        let mut draft = sample_draft();
        draft.special_instructions = Some("Puff sleeves, deep back".to_string());
        draft.attachments.drawings.push("data:image/png;base64,ZZ==".to_string());
        let record = CreatedBillRecord::from_response(&json!({ "_id": "x" }));
        let bill = assemble_bill(&draft, &record, date());

        assert_eq!(bill.special_instructions.as_deref(), Some("Puff sleeves, deep back"));
        assert_eq!(bill.attachments.drawings.len(), 1);
        assert_eq!(bill.customer_name, "Meera Joshi");
    }
}
