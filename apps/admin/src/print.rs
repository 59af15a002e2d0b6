//! # Printable Bill Layout
//!
//! Assembles the data behind the printed bill: a two-column page with a
//! tailor copy and a customer copy rendered from the same figures.
//!
//! ```text
//! ┌───────────────────────────────┬───────────────────────────────┐
//! │          TAILOR COPY          │         CUSTOMER COPY         │
//! │  Shop name / tagline / addr   │  Shop name / tagline / addr   │
//! │  [Bill No] [Date] [Qty]       │  CASH MEMO  Bill No - NNN     │
//! │  item rows with line totals   │  item rows with line totals   │
//! │  subtotal / discount / total  │  subtotal / discount / total  │
//! │  advance / balance            │  advance / balance            │
//! ├───────────────────────────────┴───────────────────────────────┤
//! │  Scan to Pay block (only when balance > 0): QR, UPI id,       │
//! │  amount, Order #NNN, tap-to-pay link                          │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only data assembly lives here; fonts, rules and column widths belong to
//! the front end's print stylesheet.

use serde::Serialize;

use darzi_core::{Bill, PaymentRequest};

use crate::config::AppConfig;

/// Everything the print view needs, amounts pre-formatted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintableBill {
    pub shop_name: String,
    pub shop_tagline: String,
    pub shop_address: Vec<String>,

    /// Display number; `None` renders as pending assignment.
    pub bill_number: Option<String>,
    /// Bill date, `dd/mm/yyyy`.
    pub date: String,
    pub due_date: Option<String>,
    /// Total garment quantity shown in the header.
    pub garment_count: i64,

    pub lines: Vec<PrintedLine>,

    pub subtotal: String,
    pub discount: String,
    pub total: String,
    pub advance: String,
    pub balance: String,

    pub special_instructions: Option<String>,

    /// Present only when something is still owed.
    pub payment: Option<PrintedPayment>,
}

/// One garment row on the printed bill.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintedLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price: String,
    pub line_total: String,
}

/// The "Scan to Pay" block.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintedPayment {
    pub qr_code: Option<String>,
    pub upi_id: String,
    pub amount: String,
    /// `Order #NNN` caption; absent while the number is pending.
    pub reference: Option<String>,
    /// Tap-to-pay deep link.
    pub uri: String,
}

impl PrintableBill {
    /// Label for the bill-number box, with a pending placeholder.
    pub fn number_label(&self) -> &str {
        self.bill_number.as_deref().unwrap_or("PENDING")
    }
}

/// Lays out a bill for printing with the given shop identity and UPI id.
pub fn printable_bill(bill: &Bill, config: &AppConfig, upi_id: &str) -> PrintableBill {
    let payment = PaymentRequest::for_bill(bill, upi_id, &config.shop_name).map(|request| {
        PrintedPayment {
            qr_code: request.qr_code.clone(),
            upi_id: request.upi_id.clone(),
            amount: config.format_currency(request.amount),
            reference: request.reference.clone(),
            uri: request.uri(),
        }
    });

    PrintableBill {
        shop_name: config.shop_name.clone(),
        shop_tagline: config.shop_tagline.clone(),
        shop_address: config.shop_address.clone(),
        bill_number: bill.bill_number.clone(),
        date: bill.created_date.format("%d/%m/%Y").to_string(),
        due_date: bill.due_date.map(|d| d.format("%d/%m/%Y").to_string()),
        garment_count: bill.garment_count(),
        lines: bill
            .items
            .iter()
            .map(|item| PrintedLine {
                name: item.name.clone(),
                quantity: item.quantity,
                unit_price: config.format_currency(item.unit_price),
                line_total: config.format_currency(item.line_total()),
            })
            .collect(),
        subtotal: config.format_currency(bill.subtotal),
        discount: config.format_currency(bill.discount),
        total: config.format_currency(bill.total),
        advance: config.format_currency(bill.advance),
        balance: config.format_currency(bill.balance),
        special_instructions: bill.special_instructions.clone(),
        payment,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use darzi_core::{assemble_bill, BillDraft, CreatedBillRecord, LineItem, Money};
    use serde_json::json;

    fn sample_bill(advance_rupees: i64) -> Bill {
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
        draft.advance = Money::from_rupees(advance_rupees);

        let record = CreatedBillRecord::from_response(&json!({
            "_id": "b1", "bill_no": 7, "qr_code": "data:image/png;base64,QQ=="
        }));
        assemble_bill(&draft, &record, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap())
    }

    #[test]
    fn test_layout_carries_header_and_totals() {
        let config = AppConfig::default();
        let layout = printable_bill(&sample_bill(400), &config, "shop@upi");

        assert_eq!(layout.number_label(), "007");
        assert_eq!(layout.date, "14/03/2026");
        assert_eq!(layout.garment_count, 3);
        assert_eq!(layout.lines.len(), 2);
        assert_eq!(layout.lines[0].line_total, "₹1000.00");
        assert_eq!(layout.subtotal, "₹1300.00");
        assert_eq!(layout.total, "₹1200.00");
        assert_eq!(layout.balance, "₹800.00");
    }

    #[test]
    fn test_payment_block_present_when_balance_positive() {
        let config = AppConfig::default();
        let layout = printable_bill(&sample_bill(400), &config, "shop@upi");

        let payment = layout.payment.expect("balance owed, block expected");
        assert_eq!(payment.amount, "₹800.00");
        assert_eq!(payment.reference.as_deref(), Some("007"));
        assert!(payment.uri.starts_with("upi://pay?pa=shop@upi"));
        assert!(payment.qr_code.is_some());
    }

    #[test]
    fn test_payment_block_absent_when_settled() {
        let config = AppConfig::default();
        // Advance covers the whole bill; QR payload alone must not force
        // the block in
        let layout = printable_bill(&sample_bill(1200), &config, "shop@upi");
        assert!(layout.payment.is_none());
    }

    #[test]
    fn test_pending_number_label() {
        let config = AppConfig::default();
        let mut bill = sample_bill(400);
        bill.bill_number = None;
        let layout = printable_bill(&bill, &config, "shop@upi");
        assert_eq!(layout.number_label(), "PENDING");
    }
}
