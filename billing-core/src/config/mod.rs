use crate::error::AppError;
use config::{Config as Cfg, File};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Application settings shared by the billing crates.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Per-bundle surcharge applied when a party has no bundle rate of its own.
    #[serde(default = "default_bundle_rate")]
    pub default_bundle_rate: Decimal,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_currency_code() -> String {
    "INR".to_string()
}

fn default_currency_symbol() -> String {
    "\u{20B9}".to_string()
}

fn default_locale() -> String {
    "en-IN".to_string()
}

fn default_bundle_rate() -> Decimal {
    Decimal::ZERO
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_code: default_currency_code(),
            currency_symbol: default_currency_symbol(),
            locale: default_locale(),
            default_bundle_rate: default_bundle_rate(),
            log_level: default_log_level(),
        }
    }
}
