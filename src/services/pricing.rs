use crate::services::cart::PricedLine;
use bigdecimal::rounding::RoundingMode;
use bigdecimal::{BigDecimal, ToPrimitive};

/// Checkout pricing configuration. The flat fee is waived once the subtotal
/// reaches the free-shipping threshold.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub shipping_fee: BigDecimal,
    pub free_shipping_threshold: BigDecimal,
    pub currency: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            shipping_fee: BigDecimal::from(150),
            free_shipping_threshold: BigDecimal::from(800),
            currency: "usd".to_string(),
        }
    }
}

pub fn subtotal(lines: &[PricedLine]) -> BigDecimal {
    lines.iter().fold(BigDecimal::from(0), |acc, line| {
        acc + &line.unit_price * BigDecimal::from(line.quantity)
    })
}

pub fn shipping(config: &PricingConfig, subtotal: &BigDecimal) -> BigDecimal {
    if *subtotal >= config.free_shipping_threshold {
        BigDecimal::from(0)
    } else {
        config.shipping_fee.clone()
    }
}

pub fn total(config: &PricingConfig, lines: &[PricedLine]) -> BigDecimal {
    let sub = subtotal(lines);
    let fee = shipping(config, &sub);
    sub + fee
}

/// Smallest-currency-unit conversion. Rounds exactly once, here, so line
/// arithmetic never accumulates rounding error. `None` when the total does
/// not fit in an i64 cent amount.
pub fn amount_in_cents(total: &BigDecimal) -> Option<i64> {
    (total * BigDecimal::from(100))
        .with_scale_round(0, RoundingMode::HalfUp)
        .to_i64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn line(price: &str, quantity: i32) -> PricedLine {
        PricedLine {
            product_id: 1,
            variant_id: None,
            quantity,
            unit_price: BigDecimal::from_str(price).unwrap(),
        }
    }

    #[test]
    fn test_shipping_charged_below_threshold() {
        let config = PricingConfig::default();
        let lines = vec![line("500", 1)];

        let total = total(&config, &lines);

        assert_eq!(total, BigDecimal::from(650));
        assert_eq!(amount_in_cents(&total), Some(65000));
    }

    #[test]
    fn test_shipping_waived_at_threshold() {
        let config = PricingConfig::default();

        assert_eq!(
            shipping(&config, &BigDecimal::from(800)),
            BigDecimal::from(0)
        );
        assert_eq!(
            shipping(&config, &BigDecimal::from_str("799.99").unwrap()),
            BigDecimal::from(150)
        );
    }

    #[test]
    fn test_subtotal_sums_price_times_quantity() {
        let lines = vec![line("19.99", 2), line("120", 1)];

        assert_eq!(subtotal(&lines), BigDecimal::from_str("159.98").unwrap());
    }

    #[test]
    fn test_cents_rounded_once_at_the_end() {
        let config = PricingConfig::default();
        // Three thirds of a unit: no per-line rounding may happen.
        let lines = vec![line("0.333", 3)];

        let total = total(&config, &lines);

        assert_eq!(total, BigDecimal::from_str("150.999").unwrap());
        assert_eq!(amount_in_cents(&total), Some(15100));
    }

    #[test]
    fn test_cents_overflow_detected() {
        let huge = BigDecimal::from(i64::MAX);

        assert_eq!(amount_in_cents(&huge), None);
        assert_eq!(amount_in_cents(&BigDecimal::from(650)), Some(65000));
    }

    #[test]
    fn test_total_is_deterministic() {
        let config = PricingConfig::default();
        let lines = vec![line("249.50", 3), line("18.95", 2)];

        let first = total(&config, &lines);
        let second = total(&config, &lines);

        assert_eq!(first, second);
        assert_eq!(amount_in_cents(&first), amount_in_cents(&second));
    }
}
