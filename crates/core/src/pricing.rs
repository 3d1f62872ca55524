//! Delivery policy and cart totals.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Flat delivery fee and the subtotal at which delivery becomes free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Charged when the subtotal is below `min_free_delivery`.
    pub delivery_fee: Decimal,
    /// Subtotal at or above which delivery is waived.
    pub min_free_delivery: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            delivery_fee: Decimal::new(500, 2),
            min_free_delivery: Decimal::new(5000, 2),
        }
    }
}

impl PricingPolicy {
    /// Create a policy.
    #[must_use]
    pub const fn new(delivery_fee: Decimal, min_free_delivery: Decimal) -> Self {
        Self {
            delivery_fee,
            min_free_delivery,
        }
    }

    /// Delivery charge for a given subtotal.
    #[must_use]
    pub fn delivery_for(&self, subtotal: Decimal) -> Decimal {
        if subtotal >= self.min_free_delivery {
            Decimal::ZERO
        } else {
            self.delivery_fee
        }
    }

    /// Subtotal, delivery and grand total for a given subtotal.
    #[must_use]
    pub fn totals_for(&self, subtotal: Decimal) -> Totals {
        let delivery = self.delivery_for(subtotal);
        Totals {
            subtotal,
            delivery,
            total: subtotal.saturating_add(delivery),
            min_free_delivery: self.min_free_delivery,
        }
    }
}

/// Derived pricing for a cart snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub delivery: Decimal,
    pub total: Decimal,
    min_free_delivery: Decimal,
}

impl Totals {
    /// Whether the delivery fee was waived.
    #[must_use]
    pub fn is_free_delivery(&self) -> bool {
        self.delivery.is_zero()
    }

    /// How much more the shopper must add to get free delivery.
    ///
    /// Zero once the threshold is reached.
    #[must_use]
    pub fn remaining_for_free_delivery(&self) -> Decimal {
        self.min_free_delivery
            .saturating_sub(self.subtotal)
            .max(Decimal::ZERO)
    }
}

/// Format an amount in soles with two decimals (e.g., "S/ 25.00").
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("S/ {rounded:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.delivery_fee, Decimal::new(5, 0));
        assert_eq!(policy.min_free_delivery, Decimal::new(50, 0));
    }

    #[test]
    fn test_delivery_below_threshold() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.delivery_for(Decimal::new(25, 0)), Decimal::new(5, 0));
        assert_eq!(policy.delivery_for(Decimal::new(4999, 2)), Decimal::new(5, 0));
    }

    #[test]
    fn test_delivery_at_and_above_threshold() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.delivery_for(Decimal::new(50, 0)), Decimal::ZERO);
        assert_eq!(policy.delivery_for(Decimal::new(60, 0)), Decimal::ZERO);
    }

    #[test]
    fn test_totals() {
        let totals = PricingPolicy::default().totals_for(Decimal::new(25, 0));
        assert_eq!(totals.delivery, Decimal::new(5, 0));
        assert_eq!(totals.total, Decimal::new(30, 0));
        assert!(!totals.is_free_delivery());
        assert_eq!(totals.remaining_for_free_delivery(), Decimal::new(25, 0));

        let totals = PricingPolicy::default().totals_for(Decimal::new(60, 0));
        assert_eq!(totals.total, Decimal::new(60, 0));
        assert!(totals.is_free_delivery());
        assert_eq!(totals.remaining_for_free_delivery(), Decimal::ZERO);
    }

    #[test]
    fn test_empty_cart_still_pays_delivery() {
        let totals = PricingPolicy::default().totals_for(Decimal::ZERO);
        assert_eq!(totals.total, Decimal::new(5, 0));
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let policy = PricingPolicy::new(Decimal::MAX, Decimal::MAX);
        let totals = policy.totals_for(Decimal::MAX - Decimal::ONE);
        assert_eq!(totals.total, Decimal::MAX);
        assert_eq!(totals.remaining_for_free_delivery(), Decimal::ONE);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::new(25, 0)), "S/ 25.00");
        assert_eq!(format_amount(Decimal::new(125, 1)), "S/ 12.50");
        assert_eq!(format_amount(Decimal::new(10005, 3)), "S/ 10.01");
        assert_eq!(format_amount(Decimal::ZERO), "S/ 0.00");
    }
}
