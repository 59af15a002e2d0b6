//! # Domain Types
//!
//! Core domain types used throughout Darzi.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Bill       │   │    Customer     │   │  CustomerStats  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (server)    │   │  id (server)    │   │  total_customers│       │
//! │  │  bill_number    │   │  name, phone    │   │  with_outstand. │       │
//! │  │  items, totals  │   │  aggregates     │   │  outstanding ₹  │       │
//! │  │  status         │   │  bills summary  │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `Bill` and `Customer` ids are assigned by the backend. The wire format
//! historically used `_id`; serde aliases accept both spellings.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::draft::{Attachments, LineItem};
use crate::money::Money;

// =============================================================================
// Bill Status
// =============================================================================

/// Payment status of a persisted bill.
///
/// The set is backend-defined and open: status transitions happen server-side
/// (payments are recorded there) and are re-fetched, never computed locally.
/// Unrecognized values deserialize as [`BillStatus::Unknown`] rather than
/// failing the whole record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, Default)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    /// Nothing paid beyond the advance taken at creation.
    #[default]
    Pending,
    /// Fully settled.
    Paid,
    /// Some payment received after creation, balance remains.
    PartiallyPaid,
    /// A status this client version does not know about.
    #[serde(other)]
    Unknown,
}

impl BillStatus {
    /// Stable lowercase label for display and logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Paid => "paid",
            BillStatus::PartiallyPaid => "partially_paid",
            BillStatus::Unknown => "unknown",
        }
    }
}

// =============================================================================
// Bill
// =============================================================================

/// A finalized bill: the draft fields plus server-assigned identity.
///
/// Created once by the assembler (see [`crate::assemble`]) or deserialized
/// from the backend's bill list; never mutated afterwards by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bill {
    /// Backend identifier. Absent only when a partial creation response
    /// omitted it; display layers show the bill as pending assignment.
    #[serde(default, alias = "_id")]
    pub id: Option<String>,

    /// Stable display number, e.g. `"007"`. Absent while unassigned.
    #[serde(default, alias = "bill_no_str", alias = "billNoStr")]
    pub bill_number: Option<String>,

    #[serde(default)]
    pub customer_id: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub customer_address: Option<String>,

    /// Ordered line items, frozen at assembly time.
    pub items: Vec<LineItem>,

    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
    pub advance: Money,
    pub balance: Money,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,

    #[serde(default)]
    pub special_instructions: Option<String>,

    /// Design images, drawings, signature. Opaque payloads, never decoded.
    #[serde(default)]
    pub attachments: Attachments,

    #[ts(as = "String")]
    pub created_date: NaiveDate,

    pub status: BillStatus,

    /// Payment QR payload supplied by the backend, carried verbatim.
    /// Whether it is *shown* is a presentation decision keyed on the
    /// locally computed balance, not on this field's presence.
    #[serde(default, alias = "qrCode")]
    pub qr_code: Option<String>,
}

impl Bill {
    /// Total garment quantity across all line items (printed on the header).
    pub fn garment_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// =============================================================================
// Bill Summary
// =============================================================================

/// One line of a customer's bill history, embedded in customer detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillSummary {
    #[serde(default, alias = "bill_no_str", alias = "billNoStr")]
    pub bill_number: Option<String>,
    pub total: Money,
    pub status: BillStatus,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer record. Lifecycle and aggregates are backend-owned; this crate
/// only displays and (for visible revenue) sums what it was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    #[serde(alias = "_id")]
    pub id: String,

    pub name: String,
    pub phone: String,

    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Lifetime number of bills, maintained by the backend.
    #[serde(default)]
    pub total_orders: i64,

    /// Lifetime billed amount, maintained by the backend.
    #[serde(default)]
    pub total_spent: Money,

    /// Unpaid amount across this customer's bills, maintained by the backend.
    #[serde(default)]
    pub outstanding_balance: Money,

    /// Bill history, present only on the customer-detail endpoint.
    #[serde(default)]
    pub bills: Option<Vec<BillSummary>>,
}

impl Customer {
    /// Whether the customer currently owes anything.
    #[inline]
    pub fn has_outstanding(&self) -> bool {
        self.outstanding_balance.is_positive()
    }
}

// =============================================================================
// Customer Stats
// =============================================================================

/// Aggregate statistics fetched independently of the customer list.
///
/// There is no atomicity between the list fetch and this fetch; the two may
/// disagree transiently and are displayed side by side regardless.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct CustomerStats {
    pub total_customers: i64,
    pub customers_with_outstanding: i64,
    pub total_outstanding_amount: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
