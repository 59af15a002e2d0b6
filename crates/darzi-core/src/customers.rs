//! # Customer Display Reconciliation
//!
//! The customer screen shows two independently fetched feeds side by side:
//! the customer list and the aggregate stats. The two come from separate
//! calls with no atomicity guarantee, so nothing here asserts equality
//! between them — each figure is derived from exactly one source.
//!
//! The only locally derived figure is [`visible_revenue`]: the sum of
//! `total_spent` over the customers currently loaded. It is a visible-subset
//! total, not a grand total, and must be labeled as such wherever shown — a
//! filtered or paginated list will not match any backend aggregate.

use crate::money::Money;
use crate::types::Customer;

/// Sum of `total_spent` over the currently loaded customers only.
pub fn visible_revenue(customers: &[Customer]) -> Money {
    customers.iter().map(|c| c.total_spent).sum()
}

/// Case-insensitive substring filter over the already-fetched list.
///
/// Matches the name case-insensitively and the phone by plain containment.
/// An empty (or all-whitespace) term matches everything. This never
/// re-queries the backend; a debounced re-fetch by search term is a separate
/// collaborator's job.
pub fn filter_customers<'a>(customers: &'a [Customer], term: &str) -> Vec<&'a Customer> {
    let term = term.trim();
    if term.is_empty() {
        return customers.iter().collect();
    }
    let needle = term.to_lowercase();
    customers
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle) || c.phone.contains(term))
        .collect()
}
