//! # Screen State Module
//!
//! One focused view model per screen, rather than a single app-wide state
//! blob:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Screen State Architecture                            │
//! │                                                                         │
//! │  ┌──────────────────────┐      ┌──────────────────────────────┐        │
//! │  │   BillingScreen      │      │   CustomersScreen            │        │
//! │  │                      │      │                              │        │
//! │  │  Arc<Mutex<          │      │  Arc<Mutex<                  │        │
//! │  │    draft, upi id,    │      │    customers, stats,         │        │
//! │  │    preview           │      │    search term               │        │
//! │  │  >>                  │      │  >>                          │        │
//! │  └──────────────────────┘      └──────────────────────────────┘        │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Locks guard quick reads/writes only, never held across an await     │
//! │  • Each screen carries a generation counter; dismissing the screen     │
//! │    bumps it, so responses resolving afterwards are dropped             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod billing;
mod customers;

pub use billing::BillingScreen;
pub use customers::CustomersScreen;

// =============================================================================
// Test Support
// =============================================================================
