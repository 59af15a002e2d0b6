//! # Billing Screen State
//!
//! View model behind the billing screen: the editable draft, the UPI id in
//! effect, and the assembled preview bill.
//!
//! ## Bill Generation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     generate_bill                                       │
//! │                                                                         │
//! │  validate draft ──fail──► ApiError(VALIDATION), no network call         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  POST /api/bills ──fail──► ApiError, draft and preview untouched        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  normalize response (bill_no_str / billNoStr / bill_no / nothing)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  assemble Bill (totals recomputed from the draft, QR carried through)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  preview stored ──► printable layout / payment affordance               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The UPI id starts at the configured fallback and is refreshed best-effort
//! from backend settings; a failed or empty settings fetch keeps the value
//! already in effect and never blocks the preview.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use darzi_backend::{BackendApi, BillPayload, UpiSettings};
use darzi_core::validation::validate_draft;
use darzi_core::{assemble_bill, Bill, BillDraft, CreatedBillRecord, PaymentRequest};

use crate::config::AppConfig;
use crate::error::ApiError;

#[derive(Debug, Default)]
struct BillingViewModel {
    draft: BillDraft,
    upi_id: String,
    preview: Option<Bill>,
    submitting: bool,
    /// Generation counter; bumped on reset so a creation resolving after the
    /// screen was dismissed does not resurrect its preview.
    generation: u64,
}

/// Shared handle to the billing screen state.
#[derive(Debug, Clone)]
pub struct BillingScreen {
    /// Payee name embedded in payment links (the shop name).
    payee_name: String,
    inner: Arc<Mutex<BillingViewModel>>,
}

impl BillingScreen {
    /// Creates a billing screen. The UPI id starts at the configured
    /// fallback; call [`Self::refresh_upi_settings`] to pick up the backend
    /// value when available.
    pub fn new(config: &AppConfig) -> Self {
        BillingScreen {
            payee_name: config.shop_name.clone(),
            inner: Arc::new(Mutex::new(BillingViewModel {
                upi_id: config.fallback_upi_id.clone(),
                ..BillingViewModel::default()
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BillingViewModel> {
        self.inner.lock().expect("billing view model mutex poisoned")
    }

    // =========================================================================
    // Draft Access
    // =========================================================================

    /// Executes a function with read access to the draft.
    pub fn with_draft<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&BillDraft) -> R,
    {
        f(&self.lock().draft)
    }

    /// Executes a function with write access to the draft.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// screen.with_draft_mut(|draft| draft.add_item(item))?;
    /// ```
    pub fn with_draft_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut BillDraft) -> R,
    {
        f(&mut self.lock().draft)
    }

    /// Clears the draft and the preview for the next customer.
    pub fn clear_draft(&self) {
        let mut vm = self.lock();
        vm.draft.clear();
        vm.preview = None;
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// UPI id currently in effect for payment links.
    pub fn upi_id(&self) -> String {
        self.lock().upi_id.clone()
    }

    /// The assembled bill shown in the preview dialog, if one exists.
    pub fn preview(&self) -> Option<Bill> {
        self.lock().preview.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.lock().submitting
    }

    /// Payment affordance for the preview: `Some` only when the previewed
    /// bill's recomputed balance is positive.
    pub fn payment_request(&self) -> Option<PaymentRequest> {
        let vm = self.lock();
        let bill = vm.preview.as_ref()?;
        PaymentRequest::for_bill(bill, &vm.upi_id, &self.payee_name)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Abandons in-flight work and resets the screen. The UPI id in effect
    /// is kept — it is configuration, not per-bill state.
    pub fn reset(&self) {
        let mut vm = self.lock();
        vm.generation += 1;
        vm.draft.clear();
        vm.preview = None;
        vm.submitting = false;
    }

    // =========================================================================
    // Backend Interactions
    // =========================================================================

    /// Refreshes the UPI id from backend settings. Best-effort: an absent
    /// id or a failed call keeps the value already in effect.
    pub async fn refresh_upi_settings(&self, api: &dyn BackendApi) {
        match api.get_upi_settings().await {
            Ok(UpiSettings { upi_id: Some(id) }) if !id.trim().is_empty() => {
                debug!(upi_id = %id, "UPI id updated from backend settings");
                self.lock().upi_id = id;
            }
            Ok(_) => debug!("UPI settings carry no id; keeping current"),
            Err(err) => warn!("UPI settings fetch failed (keeping current id): {}", err),
        }
    }

    /// Validates the draft, creates the bill, and assembles the preview.
    ///
    /// A validation failure surfaces before any network call. A backend
    /// failure leaves the draft and any previous preview untouched — the
    /// operation is simply not-applied and the user retries.
    pub async fn generate_bill(
        &self,
        api: &dyn BackendApi,
        today: NaiveDate,
    ) -> Result<Bill, ApiError> {
        let (draft, generation) = {
            let mut vm = self.lock();
            if vm.submitting {
                return Err(ApiError::validation("A bill is already being generated"));
            }
            validate_draft(&vm.draft)?;
            vm.submitting = true;
            (vm.draft.clone(), vm.generation)
        };

        let request_id = Uuid::new_v4();
        debug!(%request_id, items = draft.item_count(), "Creating bill");

        let payload = BillPayload::from_draft(&draft);
        let response = match api.create_bill(&payload).await {
            Ok(response) => response,
            Err(err) => {
                warn!(%request_id, "Bill creation failed: {}", err);
                let mut vm = self.lock();
                if vm.generation == generation {
                    vm.submitting = false;
                }
                return Err(err.into());
            }
        };

        let record = CreatedBillRecord::from_response(&response);
        let bill = assemble_bill(&draft, &record, today);
        info!(
            %request_id,
            bill_number = bill.bill_number.as_deref().unwrap_or("<pending>"),
            balance = %bill.balance,
            "Bill created"
        );

        let mut vm = self.lock();
        if vm.generation == generation {
            vm.submitting = false;
            vm.preview = Some(bill.clone());
        } else {
            debug!(%request_id, "Dropping bill creation response from a previous generation");
        }
        Ok(bill)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
