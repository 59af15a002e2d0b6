//! # UPI Payment Affordance
//!
//! Builds the payment request shown on a bill preview: a `upi://pay` deep
//! link for tap-to-pay plus the backend-supplied QR payload for scanning.
//!
//! ## Suppression Rule
//! A payment affordance exists only when the bill's balance — recomputed here
//! from the bill's own items, discount and advance — is positive. Any
//! server-reported balance field is ignored for this decision: the server
//! echo may be stale against local edits.
//!
//! The UPI id itself is injected by the caller (configuration fallback,
//! optionally refreshed from backend settings); this module never decides
//! where it comes from.

use crate::draft::{compute_balance, compute_subtotal, compute_total};
use crate::money::Money;
use crate::types::Bill;

/// Everything the preview needs to render the "scan to pay" block.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    /// Payee UPI id in effect when the preview opened.
    pub upi_id: String,
    /// Payee display name embedded in the link.
    pub payee_name: String,
    /// Amount due, computed from the bill's own figures.
    pub amount: Money,
    /// Opaque QR payload from the backend, when it supplied one.
    pub qr_code: Option<String>,
    /// Bill display number for the "Order #NNN" caption.
    pub reference: Option<String>,
}

impl PaymentRequest {
    /// Derives the payment affordance for a bill, or `None` when nothing is
    /// owed. The balance is recomputed from the bill's items, discount and
    /// advance — never read from a server-reported field.
    pub fn for_bill(bill: &Bill, upi_id: &str, payee_name: &str) -> Option<PaymentRequest> {
        let subtotal = compute_subtotal(&bill.items);
        let total = compute_total(subtotal, bill.discount);
        let balance = compute_balance(total, bill.advance);
        if !balance.is_positive() {
            return None;
        }
        Some(PaymentRequest {
            upi_id: upi_id.to_string(),
            payee_name: payee_name.to_string(),
            amount: balance,
            qr_code: bill.qr_code.clone(),
            reference: bill.bill_number.clone(),
        })
    }

    /// The tap-to-pay deep link:
    /// `upi://pay?pa=<id>&pn=<payee>&am=<amount>&cu=INR`.
    pub fn uri(&self) -> String {
        format!(
            "upi://pay?pa={}&pn={}&am={}&cu=INR",
            self.upi_id,
            self.payee_name,
            self.amount.to_decimal_string()
        )
    }
}
