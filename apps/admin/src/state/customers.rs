//! # Customers Screen State
//!
//! View model behind the customer management screen.
//!
//! ## Two Independent Feeds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Customers Screen Data Flow                             │
//! │                                                                         │
//! │  list_customers ──────┐                 ┌────── get_customer_stats      │
//! │  (may finish 2nd)     │                 │       (may finish 1st)        │
//! │                       ▼                 ▼                               │
//! │              ┌──────────────────────────────────┐                       │
//! │              │        CustomersScreen           │                       │
//! │              │  customers: Vec<Customer>        │                       │
//! │              │  stats: CustomerStats            │                       │
//! │              │  (defaults until each resolves)  │                       │
//! │              └──────────────────────────────────┘                       │
//! │                                                                         │
//! │  No ordering guarantee between the two completions, and no equality    │
//! │  asserted between their figures.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Staleness Rules
//! - A failed list fetch keeps the previously displayed list (stale-but-valid
//!   beats a blanked screen) and surfaces the error.
//! - A failed stats fetch is silent: stats are best-effort with a zero
//!   default.
//! - Responses that resolve after the screen was reset are dropped via a
//!   generation counter — a no-op, never a crash.

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use darzi_backend::{BackendApi, CustomerPayload};
use darzi_core::customers::{filter_customers, visible_revenue};
use darzi_core::validation::{validate_customer_name, validate_phone, validate_search_query};
use darzi_core::{Customer, CustomerStats, Money};

use crate::error::ApiError;

#[derive(Debug, Default)]
struct CustomersViewModel {
    customers: Vec<Customer>,
    stats: CustomerStats,
    search_term: String,
    loading_customers: bool,
    loading_stats: bool,
    last_error: Option<ApiError>,
    /// Generation counter; bumped on reset so in-flight responses from a
    /// previous generation are dropped on arrival.
    generation: u64,
}

/// Shared handle to the customers screen state.
///
/// Cloning is cheap (`Arc`); all clones see the same view model. Locks are
/// held only for quick reads/writes, never across an await.
#[derive(Debug, Clone, Default)]
pub struct CustomersScreen {
    inner: Arc<Mutex<CustomersViewModel>>,
}

impl CustomersScreen {
    /// Creates a screen with empty list and zero stats (the render-ready
    /// defaults used until the first fetches resolve).
    pub fn new() -> Self {
        CustomersScreen::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CustomersViewModel> {
        self.inner.lock().expect("customers view model mutex poisoned")
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Customers matching the current search term, in backend order.
    pub fn visible_customers(&self) -> Vec<Customer> {
        let vm = self.lock();
        filter_customers(&vm.customers, &vm.search_term)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Revenue across the currently loaded customers only — a visible-subset
    /// figure, not a grand total.
    pub fn visible_revenue(&self) -> Money {
        visible_revenue(&self.lock().customers)
    }

    pub fn stats(&self) -> CustomerStats {
        self.lock().stats
    }

    pub fn is_loading(&self) -> bool {
        let vm = self.lock();
        vm.loading_customers || vm.loading_stats
    }

    /// Error from the most recent failed list operation, if any.
    pub fn last_error(&self) -> Option<ApiError> {
        self.lock().last_error.clone()
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Updates the search term used by [`Self::visible_customers`].
    ///
    /// Filtering is local and immediate; the debounced backend re-fetch by
    /// term is the caller's collaborator, typically a follow-up
    /// [`Self::load_customers`].
    pub fn set_search(&self, term: &str) -> Result<(), ApiError> {
        let term = validate_search_query(term)?;
        self.lock().search_term = term;
        Ok(())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Abandons in-flight work and clears the screen, e.g. on navigation
    /// away. Responses still in flight become no-ops.
    pub fn reset(&self) {
        let mut vm = self.lock();
        let next_generation = vm.generation + 1;
        *vm = CustomersViewModel {
            generation: next_generation,
            ..CustomersViewModel::default()
        };
    }

    // =========================================================================
    // Fetches
    // =========================================================================

    /// Loads the customer list. On failure the previous list stays on screen
    /// and the error is surfaced via [`Self::last_error`].
    pub async fn load_customers(&self, api: &dyn BackendApi) {
        let (generation, term) = {
            let mut vm = self.lock();
            vm.loading_customers = true;
            (vm.generation, vm.search_term.clone())
        };

        let search = if term.is_empty() { None } else { Some(term.as_str()) };
        let result = api.list_customers(search).await;

        let mut vm = self.lock();
        if vm.generation != generation {
            debug!("Dropping customer list response from a previous generation");
            return;
        }
        vm.loading_customers = false;
        match result {
            Ok(customers) => {
                debug!(count = customers.len(), "Customer list loaded");
                vm.customers = customers;
                vm.last_error = None;
            }
            Err(err) => {
                warn!("Customer list fetch failed: {}", err);
                vm.last_error = Some(err.into());
            }
        }
    }

    /// Loads the aggregate stats. Best-effort: failures are logged and the
    /// previous (or zero) stats stay on screen.
    pub async fn load_stats(&self, api: &dyn BackendApi) {
        let generation = {
            let mut vm = self.lock();
            vm.loading_stats = true;
            vm.generation
        };

        let result = api.get_customer_stats().await;

        let mut vm = self.lock();
        if vm.generation != generation {
            debug!("Dropping stats response from a previous generation");
            return;
        }
        vm.loading_stats = false;
        match result {
            Ok(stats) => vm.stats = stats,
            Err(err) => debug!("Stats fetch failed (keeping previous): {}", err),
        }
    }

    /// Refreshes both feeds concurrently. Either may complete first; each is
    /// merged independently as it lands.
    pub async fn refresh(&self, api: &dyn BackendApi) {
        tokio::join!(self.load_customers(api), self.load_stats(api));
    }

    // =========================================================================
    // Mutations (backend-owned; screen reloads afterwards)
    // =========================================================================

    /// Creates a customer, then reloads both feeds. Validation failures make
    /// no network call.
    pub async fn add_customer(
        &self,
        api: &dyn BackendApi,
        payload: CustomerPayload,
    ) -> Result<Customer, ApiError> {
        validate_customer_name(&payload.name)?;
        validate_phone(&payload.phone)?;

        let created = api.create_customer(&payload).await?;
        info!(customer_id = %created.id, "Customer created");
        self.refresh(api).await;
        Ok(created)
    }

    /// Updates a customer, then reloads the list. Validation failures make
    /// no network call.
    pub async fn update_customer(
        &self,
        api: &dyn BackendApi,
        id: &str,
        payload: CustomerPayload,
    ) -> Result<(), ApiError> {
        validate_customer_name(&payload.name)?;
        validate_phone(&payload.phone)?;

        api.update_customer(id, &payload).await?;
        info!(customer_id = %id, "Customer updated");
        self.load_customers(api).await;
        Ok(())
    }

    /// Deletes a customer (the backend cascades to their bills), then reloads
    /// both feeds. Returns how many bills went with them. No local cache
    /// surgery: the next list simply excludes the id.
    pub async fn delete_customer(
        &self,
        api: &dyn BackendApi,
        id: &str,
    ) -> Result<u64, ApiError> {
        let outcome = api.delete_customer(id).await?;
        info!(customer_id = %id, deleted_bills = outcome.deleted_bills, "Customer deleted");
        self.refresh(api).await;
        Ok(outcome.deleted_bills)
    }

    /// Fetches the full record (with bill summaries) for the detail dialog.
    /// Read-only: does not touch screen state.
    pub async fn view_customer(
        &self,
        api: &dyn BackendApi,
        id: &str,
    ) -> Result<Customer, ApiError> {
        Ok(api.get_customer(id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::{customer, MockBackend};
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_renders_defaults_before_any_fetch() {
        let screen = CustomersScreen::new();
        assert!(screen.visible_customers().is_empty());
        assert_eq!(screen.stats(), CustomerStats::default());
        assert!(screen.visible_revenue().is_zero());
    }

    #[tokio::test]
    async fn test_stats_can_arrive_before_list() {
        let api = MockBackend::default();
        api.set_customers(vec![customer("Meera Joshi", "9876543210", 4500)]);
        api.set_stats(CustomerStats {
            total_customers: 1,
            customers_with_outstanding: 0,
            total_outstanding_amount: Money::zero(),
        });

        let screen = CustomersScreen::new();

        // Stats land first: partial render, no error
        screen.load_stats(&api).await;
        assert_eq!(screen.stats().total_customers, 1);
        assert!(screen.visible_customers().is_empty());

        // List lands second: screen converges
        screen.load_customers(&api).await;
        assert_eq!(screen.visible_customers().len(), 1);
    }

    #[tokio::test]
    async fn test_list_can_arrive_before_stats() {
        let api = MockBackend::default();
        api.set_customers(vec![customer("Meera Joshi", "9876543210", 4500)]);

        let screen = CustomersScreen::new();
        screen.load_customers(&api).await;
        assert_eq!(screen.visible_customers().len(), 1);
        // Stats still at zero defaults; no error either
        assert_eq!(screen.stats(), CustomerStats::default());
        assert!(screen.last_error().is_none());
    }

    #[tokio::test]
    async fn test_failed_list_fetch_keeps_previous_list() {
        let api = MockBackend::default();
        api.set_customers(vec![customer("Meera Joshi", "9876543210", 4500)]);

        let screen = CustomersScreen::new();
        screen.load_customers(&api).await;
        assert_eq!(screen.visible_customers().len(), 1);

        api.fail_customers();
        screen.load_customers(&api).await;

        // Stale-but-valid beats a blanked screen
        assert_eq!(screen.visible_customers().len(), 1);
        assert!(screen.last_error().is_some());
    }

    #[tokio::test]
    async fn test_failed_stats_fetch_is_silent() {
        let api = MockBackend::default();
        api.fail_stats();

        let screen = CustomersScreen::new();
        screen.load_stats(&api).await;

        assert_eq!(screen.stats(), CustomerStats::default());
        assert!(screen.last_error().is_none());
    }

    #[tokio::test]
    async fn test_late_response_after_reset_is_dropped() {
        let api = Arc::new(MockBackend::default());
        api.set_customers(vec![customer("Meera Joshi", "9876543210", 4500)]);
        api.gate_customers();

        let screen = CustomersScreen::new();
        let task = {
            let screen = screen.clone();
            let api = Arc::clone(&api);
            tokio::spawn(async move { screen.load_customers(api.as_ref()).await })
        };

        // The screen is dismissed while the request is still in flight
        tokio::task::yield_now().await;
        screen.reset();
        api.open_gate();
        task.await.unwrap();

        // The resolved response was dropped, not applied
        assert!(screen.visible_customers().is_empty());
        assert!(screen.last_error().is_none());
    }

    #[tokio::test]
    async fn test_search_filters_loaded_list_without_refetch() {
        let api = MockBackend::default();
        api.set_customers(vec![
            customer("Meera Joshi", "9876543210", 4500),
            customer("Anita Rao", "9123456780", 1200),
        ]);

        let screen = CustomersScreen::new();
        screen.load_customers(&api).await;
        let calls_after_load = api.list_calls.load(Ordering::SeqCst);

        screen.set_search("MEERA").unwrap();
        let visible = screen.visible_customers();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Meera Joshi");

        // Revenue stays a loaded-list figure, unaffected by the filter
        assert_eq!(screen.visible_revenue(), Money::from_rupees(5700));
        assert_eq!(api.list_calls.load(Ordering::SeqCst), calls_after_load);
    }

    #[tokio::test]
    async fn test_delete_reloads_both_feeds() {
        let api = MockBackend::default();
        api.set_customers(vec![
            customer("Meera Joshi", "9876543210", 4500),
            customer("Anita Rao", "9123456780", 1200),
        ]);
        api.set_deleted_bills(3);

        let screen = CustomersScreen::new();
        screen.refresh(&api).await;
        assert_eq!(screen.visible_customers().len(), 2);

        // Backend state after the cascade
        api.set_customers(vec![customer("Anita Rao", "9123456780", 1200)]);

        let deleted_bills = screen.delete_customer(&api, "id-9876543210").await.unwrap();
        assert_eq!(deleted_bills, 3);
        assert_eq!(screen.visible_customers().len(), 1);
        assert!(api.stats_calls.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn test_add_customer_validates_before_any_network_call() {
        let api = MockBackend::default();
        let screen = CustomersScreen::new();

        let err = screen
            .add_customer(
                &api,
                CustomerPayload {
                    name: "Meera Joshi".to_string(),
                    phone: String::new(),
                    ..CustomerPayload::default()
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
        assert_eq!(api.create_customer_calls.load(Ordering::SeqCst), 0);
    }
}
