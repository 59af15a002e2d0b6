//! # Backend API Contract
//!
//! The abstract gateway the screens depend on, plus the request/response
//! DTOs. Screens hold a `&dyn BackendApi`; production wires in
//! [`crate::HttpBackend`], tests wire in an in-memory double.
//!
//! ## Contract Notes
//! - `create_bill` returns an **opaque** JSON value: creation responses have
//!   drifted across backend revisions, and normalizing them is
//!   `darzi_core::assemble`'s job, not this crate's.
//! - `get_customer_stats` and `get_upi_settings` are best-effort feeds;
//!   callers have defined fallbacks for their failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use darzi_core::{Bill, BillDraft, BillStatus, Customer, CustomerStats, Money};

use crate::error::BackendResult;

// =============================================================================
// Request Payloads
// =============================================================================

/// The draft-shaped payload sent to `create_bill`.
///
/// Totals are included for the backend's records but remain advisory: the
/// client recomputes them when assembling the final bill, so a stale echo
/// can never corrupt the preview.
#[derive(Debug, Clone, Serialize)]
pub struct BillPayload {
    pub customer_id: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: Option<String>,
    pub items: Vec<darzi_core::LineItem>,
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
    pub advance: Money,
    pub balance: Money,
    pub due_date: Option<chrono::NaiveDate>,
    pub special_instructions: Option<String>,
    pub attachments: darzi_core::Attachments,
}

impl BillPayload {
    /// Snapshots a draft into the wire payload, totals computed via the core.
    pub fn from_draft(draft: &BillDraft) -> Self {
        BillPayload {
            customer_id: draft.customer_id.clone(),
            customer_name: draft.customer_name.clone(),
            customer_phone: draft.customer_phone.clone(),
            customer_address: draft.customer_address.clone(),
            items: draft.items.clone(),
            subtotal: draft.subtotal(),
            discount: draft.discount,
            total: draft.total(),
            advance: draft.advance,
            balance: draft.balance(),
            due_date: draft.due_date,
            special_instructions: draft.special_instructions.clone(),
            attachments: draft.attachments.clone(),
        }
    }
}

/// Customer create/update payload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerPayload {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// Optional filters for the bill list.
#[derive(Debug, Clone, Default)]
pub struct BillFilter {
    pub status: Option<BillStatus>,
    pub customer_id: Option<String>,
}

impl BillFilter {
    /// Renders the filter as query parameters.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(customer_id) = &self.customer_id {
            query.push(("customer_id", customer_id.clone()));
        }
        query
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Outcome of deleting a customer; the backend cascades to their bills.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DeleteCustomerResponse {
    #[serde(default)]
    pub deleted_bills: u64,
}

/// Payment settings. `upi_id` may be absent; callers fall back to their
/// configured id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpiSettings {
    #[serde(default, alias = "upiId")]
    pub upi_id: Option<String>,
}

// Response envelopes the backend wraps collections in.

#[derive(Debug, Deserialize)]
pub(crate) struct CustomersEnvelope {
    #[serde(default)]
    pub customers: Vec<Customer>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CustomerEnvelope {
    pub customer: Customer,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BillsEnvelope {
    #[serde(default)]
    pub bills: Vec<Bill>,
}

// =============================================================================
// Gateway Trait
// =============================================================================

/// The REST collaborators consumed by the admin screens.
///
/// Object-safe so screens can hold a `&dyn BackendApi` and tests can inject
/// an in-memory double without touching the network.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Creates a bill. The response is opaque; see
    /// [`darzi_core::CreatedBillRecord::from_response`].
    async fn create_bill(&self, payload: &BillPayload) -> BackendResult<Value>;

    async fn list_bills(&self, filter: Option<&BillFilter>) -> BackendResult<Vec<Bill>>;

    async fn list_customers(&self, search: Option<&str>) -> BackendResult<Vec<Customer>>;

    /// Full customer record, including bill summaries.
    async fn get_customer(&self, id: &str) -> BackendResult<Customer>;

    async fn get_customer_stats(&self) -> BackendResult<CustomerStats>;

    async fn create_customer(&self, payload: &CustomerPayload) -> BackendResult<Customer>;

    async fn update_customer(&self, id: &str, payload: &CustomerPayload) -> BackendResult<()>;

    async fn delete_customer(&self, id: &str) -> BackendResult<DeleteCustomerResponse>;

    async fn get_upi_settings(&self) -> BackendResult<UpiSettings>;
}

// =============================================================================
// Unit Tests
// =============================================================================
