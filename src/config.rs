//! Runtime configuration for the pricing display

use std::env;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::warn;

use crate::pricing::calculators::NIGHT_SURCHARGE;

/// Preference key holding the selected region
pub const DEFAULT_STORAGE_KEY: &str = "selectedRegion";
/// Selector of the hero row that receives the region toggle
pub const DEFAULT_MOUNT_SELECTOR: &str = ".hero-section .container .row";

/// Pricing display settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingConfig {
    /// Flat amount added for night-time bookings
    pub night_surcharge: Decimal,
    pub currency_symbol: String,
    /// Appended to per-item prices, e.g. `₹1,800/session`
    pub price_suffix: String,
    pub storage_key: String,
    pub mount_selector: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            night_surcharge: NIGHT_SURCHARGE,
            currency_symbol: "₹".to_string(),
            price_suffix: "/session".to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            mount_selector: DEFAULT_MOUNT_SELECTOR.to_string(),
        }
    }
}

impl PricingConfig {
    /// Load settings from the environment (and `.env` if present).
    ///
    /// Recognized variables: `PRICING_NIGHT_SURCHARGE`,
    /// `PRICING_CURRENCY_SYMBOL`, `PRICING_PRICE_SUFFIX`,
    /// `PRICING_STORAGE_KEY`, `PRICING_MOUNT_SELECTOR`. Unset or invalid
    /// values keep their defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build settings from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("PRICING_NIGHT_SURCHARGE") {
            match Decimal::from_str(raw.trim()) {
                Ok(amount) if amount >= Decimal::ZERO => config.night_surcharge = amount,
                _ => warn!(
                    "Invalid PRICING_NIGHT_SURCHARGE {:?}, using {}",
                    raw, config.night_surcharge
                ),
            }
        }
        if let Some(symbol) = lookup("PRICING_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }
        if let Some(suffix) = lookup("PRICING_PRICE_SUFFIX") {
            config.price_suffix = suffix;
        }
        if let Some(key) = lookup("PRICING_STORAGE_KEY").filter(|key| !key.is_empty()) {
            config.storage_key = key;
        }
        if let Some(selector) = lookup("PRICING_MOUNT_SELECTOR").filter(|s| !s.is_empty()) {
            config.mount_selector = selector;
        }

        config
    }
}
