//! # darzi-core: Pure Business Logic for Darzi
//!
//! This crate is the **heart** of Darzi, the tailoring-shop management
//! system. It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Darzi Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front end (React)                            │   │
//! │  │    Billing screen ──► Preview/Print ──► Customers screen        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/admin (view models)                     │   │
//! │  │    BillingScreen, CustomersScreen, printable layout             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ darzi-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   draft   │  │ assemble  │  │   │
//! │  │   │   Bill    │  │   Money   │  │ BillDraft │  │ normalize │  │   │
//! │  │   │  Customer │  │  (paise)  │  │  totals   │  │  + merge  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                 │   │
//! │  │   │ customers │  │    upi    │  │ validation│                 │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 darzi-backend (REST gateway)                    │   │
//! │  │            bills, customers, stats, UPI settings                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Bill, Customer, CustomerStats, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`draft`] - Bill draft view model and totals arithmetic
//! - [`assemble`] - Creation-response normalization and draft→Bill merge
//! - [`customers`] - Customer list/stats display reconciliation
//! - [`upi`] - Payment deep links and the QR affordance rule
//! - [`error`] - Domain error types
//! - [`validation`] - Submission gates
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic, idempotent, side-effect free
//! 2. **No I/O**: network and file system access are FORBIDDEN here
//! 3. **Integer Money**: all monetary values are paise (i64)
//! 4. **Explicit Errors**: typed errors, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod assemble;
pub mod customers;
pub mod draft;
pub mod error;
pub mod money;
pub mod types;
pub mod upi;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use assemble::{assemble_bill, BillNumber, CreatedBillRecord};
pub use draft::{compute_balance, compute_subtotal, compute_total};
pub use draft::{Attachments, BillDraft, LineItem, GARMENT_TYPES};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::{Bill, BillStatus, BillSummary, Customer, CustomerStats};
pub use upi::PaymentRequest;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum garment rows on a single bill.
///
/// Keeps runaway forms out of the backend; real orders are far smaller.
pub const MAX_BILL_ITEMS: usize = 50;

/// Maximum quantity of a single line item.
///
/// Guards against typo orders (1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Width of the zero-padded bill display number derived from a raw
/// sequence: `7` → `"007"`. Pre-formatted strings from the backend are
/// used verbatim and never re-padded.
pub const BILL_NUMBER_DISPLAY_WIDTH: usize = 3;
