use crate::services::pricing::PricingConfig;
use bigdecimal::BigDecimal;
use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::str::FromStr;

// API Config goes here
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub stripe_secret_key: String,
    /// Overrides the live Stripe endpoint, e.g. to point at a stripe-mock.
    pub stripe_api_base: Option<String>,
    pub shipping_fee: BigDecimal,
    pub free_shipping_threshold: BigDecimal,
    pub currency: String,
}

impl Config {
    pub fn new() -> Self {
        CONFIG.clone()
    }

    pub fn pricing(&self) -> PricingConfig {
        PricingConfig {
            shipping_fee: self.shipping_fee.clone(),
            free_shipping_threshold: self.free_shipping_threshold.clone(),
            currency: self.currency.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok();

    let bind_addr =
        std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

    let stripe_secret_key =
        std::env::var("STRIPE_SECRET_KEY").expect("STRIPE_SECRET_KEY must be set");

    let stripe_api_base = std::env::var("STRIPE_API_BASE").ok();

    let shipping_fee = BigDecimal::from_str(
        &std::env::var("SHIPPING_FEE").unwrap_or_else(|_| "150".to_string()),
    )
    .expect("SHIPPING_FEE must be a valid decimal");

    let free_shipping_threshold = BigDecimal::from_str(
        &std::env::var("FREE_SHIPPING_THRESHOLD").unwrap_or_else(|_| "800".to_string()),
    )
    .expect("FREE_SHIPPING_THRESHOLD must be a valid decimal");

    let currency = std::env::var("CURRENCY").unwrap_or_else(|_| "usd".to_string());

    tracing::info!("Config loaded");

    Config {
        bind_addr,
        stripe_secret_key,
        stripe_api_base,
        shipping_fee,
        free_shipping_threshold,
        currency,
    }
});
