//! # Darzi Admin Layer
//!
//! Orchestration layer for the Darzi admin screens.
//!
//! ## Module Organization
//! ```text
//! darzi_admin/
//! ├── lib.rs          ◄─── You are here (wiring & logging setup)
//! ├── state/
//! │   ├── mod.rs      ◄─── Screen state exports
//! │   ├── billing.rs  ◄─── Billing screen view model
//! │   └── customers.rs◄─── Customers screen view model
//! ├── print.rs        ◄─── Printable bill layout data
//! ├── config.rs       ◄─── Application configuration
//! └── error.rs        ◄─── API error type for the front end
//! ```
//!
//! ## Runtime Model
//! Everything here assumes a single logical event loop per screen: backend
//! calls are async and non-blocking, screen state is a small `Arc<Mutex>`
//! view model, and the only visible effect of in-flight work is a loading
//! flag. No call is retried automatically; failures surface once and leave
//! prior data on screen.
//!
//! ## Typical Wiring
//! ```rust,no_run
//! use darzi_admin::{AppConfig, BillingScreen, CustomersScreen};
//! use darzi_backend::HttpBackend;
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env();
//! let backend = HttpBackend::new(&config.backend_base_url)?;
//!
//! let customers = CustomersScreen::new();
//! customers.refresh(&backend).await;
//!
//! let billing = BillingScreen::new(&config);
//! billing.refresh_upi_settings(&backend).await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod print;
pub mod state;

pub use config::AppConfig;
pub use error::{ApiError, ErrorCode};
pub use print::{printable_bill, PrintableBill, PrintedLine, PrintedPayment};
pub use state::{BillingScreen, CustomersScreen};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=darzi=trace` - Trace for darzi crates only
/// - Default: INFO, with debug for the darzi crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,darzi=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
