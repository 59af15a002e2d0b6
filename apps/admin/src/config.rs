//! # Application Configuration
//!
//! Stores configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`DARZI_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after initialization, so no mutex is needed.
//! The fallback UPI id lives here deliberately: it is injected into the
//! billing screen rather than read as a global, so the payment path is
//! testable without network mocking.

use darzi_core::Money;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Shop name (printed on bills, used as UPI payee name)
    pub shop_name: String,

    /// Tagline printed under the shop name
    pub shop_tagline: String,

    /// Address lines (for the printed bill header)
    pub shop_address: Vec<String>,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Base URL of the shop backend
    pub backend_base_url: String,

    /// UPI id used for payment links until backend settings say otherwise.
    /// Also the value kept when the settings fetch fails.
    pub fallback_upi_id: String,
}

impl Default for AppConfig {
    /// Returns default configuration suitable for development.
    fn default() -> Self {
        AppConfig {
            shop_name: "Darzi Tailors".to_string(),
            shop_tagline: "EXCLUSIVE LADIES & CUSTOM TAILOR".to_string(),
            shop_address: vec!["Shop 12, Gandhi Bazaar".to_string(), "Bengaluru 560004".to_string()],
            currency_code: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            currency_decimals: 2,
            backend_base_url: "http://localhost:5000".to_string(),
            fallback_upi_id: "darzitailors@okhdfcbank".to_string(),
        }
    }
}

impl AppConfig {
    /// Creates an AppConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `DARZI_SHOP_NAME`: Override shop name
    /// - `DARZI_BACKEND_URL`: Override backend base URL
    /// - `DARZI_UPI_ID`: Override fallback UPI id
    pub fn from_env() -> Self {
        let mut config = AppConfig::default();

        if let Ok(shop_name) = std::env::var("DARZI_SHOP_NAME") {
            config.shop_name = shop_name;
        }

        if let Ok(base_url) = std::env::var("DARZI_BACKEND_URL") {
            config.backend_base_url = base_url;
        }

        if let Ok(upi_id) = std::env::var("DARZI_UPI_ID") {
            config.fallback_upi_id = upi_id;
        }

        config
    }

    /// Formats an amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_paise(1234)), "₹12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let paise = amount.paise();
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = paise / divisor;
        let frac = (paise % divisor).abs();

        format!(
            "{}{}{}",
            if paise < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_positive() {
        let config = AppConfig::default();
        assert_eq!(config.format_currency(Money::from_paise(1234)), "₹12.34");
        assert_eq!(config.format_currency(Money::from_rupees(800)), "₹800.00");
        assert_eq!(config.format_currency(Money::zero()), "₹0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = AppConfig::default();
        assert_eq!(config.format_currency(Money::from_paise(-1234)), "-₹12.34");
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.currency_code, "INR");
        assert!(!config.fallback_upi_id.is_empty());
    }
}
