use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::product::Product;
use crate::errors::DomainError;

/// Quantity threshold mapping to a flat discount fraction. Tiers are
/// evaluated highest threshold first and the first match wins; they never
/// stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTier {
    pub min_quantity: u32,
    pub fraction: Decimal,
}

impl DiscountTier {
    /// 2000+ -> 15%, 1000+ -> 10%, 500+ -> 5%.
    pub fn default_tiers() -> Vec<DiscountTier> {
        vec![
            DiscountTier { min_quantity: 2000, fraction: Decimal::new(15, 2) },
            DiscountTier { min_quantity: 1000, fraction: Decimal::new(10, 2) },
            DiscountTier { min_quantity: 500, fraction: Decimal::new(5, 2) },
        ]
    }
}

/// Monetary fields are rounded to 2 decimal places at construction; the
/// discount fraction stays exact (one of the tier values, or zero).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub unit_price: Decimal,
    pub base_price: Decimal,
    pub discount_fraction: Decimal,
    pub discount_amount: Decimal,
    pub total: Decimal,
}

#[derive(Clone, Debug)]
pub struct PricingCalculator {
    tiers: Vec<DiscountTier>,
}

impl PricingCalculator {
    /// Tiers must be sorted by strictly descending threshold with fractions
    /// in [0, 1). An empty table is allowed and means no discounts.
    pub fn new(tiers: Vec<DiscountTier>) -> Result<Self, DomainError> {
        for window in tiers.windows(2) {
            if window[0].min_quantity <= window[1].min_quantity {
                return Err(DomainError::InvariantViolation(
                    "discount tiers must be sorted by strictly descending threshold".to_owned(),
                ));
            }
        }
        for tier in &tiers {
            if tier.fraction < Decimal::ZERO || tier.fraction >= Decimal::ONE {
                return Err(DomainError::InvariantViolation(format!(
                    "discount fraction {} for threshold {} is outside [0, 1)",
                    tier.fraction, tier.min_quantity
                )));
            }
        }
        Ok(Self { tiers })
    }

    pub fn discount_fraction(&self, quantity: u32) -> Decimal {
        self.tiers
            .iter()
            .find(|tier| quantity >= tier.min_quantity)
            .map(|tier| tier.fraction)
            .unwrap_or(Decimal::ZERO)
    }

    /// Full-precision intermediate arithmetic; rounding happens only on the
    /// output fields.
    pub fn price(&self, product: &Product, quantity: u32) -> PricingBreakdown {
        let base_price = product.unit_price * Decimal::from(quantity);
        let discount_fraction = self.discount_fraction(quantity);
        let discount_amount = base_price * discount_fraction;
        let total = base_price - discount_amount;

        PricingBreakdown {
            unit_price: product.unit_price.round_dp(2),
            base_price: base_price.round_dp(2),
            discount_fraction,
            discount_amount: discount_amount.round_dp(2),
            total: total.round_dp(2),
        }
    }

    /// Pure availability predicate. Stock is never decremented or reserved
    /// here, so concurrent callers can jointly pass this check for
    /// quantities that together exceed inventory.
    pub fn has_stock(&self, product: &Product, quantity: u32) -> bool {
        product.stock >= quantity
    }
}

impl Default for PricingCalculator {
    fn default() -> Self {
        Self::new(DiscountTier::default_tiers()).expect("default discount tiers are valid")
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::product::{Product, Sku};
    use crate::errors::DomainError;

    use super::{DiscountTier, PricingCalculator};

    fn product(unit_price: Decimal, stock: u32) -> Product {
        Product {
            sku: Sku("CT-001".to_owned()),
            name: "Marine Grade Protective Coating".to_owned(),
            specs: "Saltwater-resistant, marine grade".to_owned(),
            unit_price,
            stock,
        }
    }

    #[test]
    fn tier_selection_is_first_match_highest_threshold() {
        let calculator = PricingCalculator::default();
        assert_eq!(calculator.discount_fraction(499), Decimal::ZERO);
        assert_eq!(calculator.discount_fraction(500), Decimal::new(5, 2));
        assert_eq!(calculator.discount_fraction(999), Decimal::new(5, 2));
        assert_eq!(calculator.discount_fraction(1000), Decimal::new(10, 2));
        assert_eq!(calculator.discount_fraction(2000), Decimal::new(15, 2));
        assert_eq!(calculator.discount_fraction(50_000), Decimal::new(15, 2));
    }

    #[test]
    fn doubling_quantity_never_decreases_the_discount() {
        let calculator = PricingCalculator::default();
        for quantity in [1u32, 250, 499, 500, 750, 999, 1000, 1999, 2000, 4000] {
            let single = calculator.discount_fraction(quantity);
            let doubled = calculator.discount_fraction(quantity * 2);
            assert!(doubled >= single, "discount regressed at quantity {quantity}");
        }
    }

    #[test]
    fn marine_scenario_prices_to_95000() {
        let calculator = PricingCalculator::default();
        let breakdown = calculator.price(&product(Decimal::new(12_500, 2), 1500), 800);

        assert_eq!(breakdown.unit_price, Decimal::new(12_500, 2));
        assert_eq!(breakdown.base_price, Decimal::new(10_000_000, 2));
        assert_eq!(breakdown.discount_fraction, Decimal::new(5, 2));
        assert_eq!(breakdown.discount_amount, Decimal::new(500_000, 2));
        assert_eq!(breakdown.total, Decimal::new(9_500_000, 2));
    }

    #[test]
    fn no_discount_below_the_lowest_tier() {
        let calculator = PricingCalculator::default();
        let breakdown = calculator.price(&product(Decimal::new(4_599, 2), 5000), 100);

        assert_eq!(breakdown.discount_fraction, Decimal::ZERO);
        assert_eq!(breakdown.discount_amount, Decimal::ZERO);
        assert_eq!(breakdown.total, breakdown.base_price);
    }

    #[test]
    fn rounding_happens_only_at_the_output() {
        let calculator = PricingCalculator::default();
        // 67.80 * 1200 = 81360.00; 10% tier -> 8136.00 off.
        let breakdown = calculator.price(&product(Decimal::new(6_780, 2), 4000), 1200);

        assert_eq!(breakdown.base_price, Decimal::new(8_136_000, 2));
        assert_eq!(breakdown.discount_amount, Decimal::new(813_600, 2));
        assert_eq!(breakdown.total, Decimal::new(7_322_400, 2));
    }

    #[test]
    fn stock_check_is_a_pure_predicate() {
        let calculator = PricingCalculator::default();
        let item = product(Decimal::new(12_500, 2), 100);

        assert!(!calculator.has_stock(&item, 800));
        assert!(calculator.has_stock(&item, 100));
        // No mutation: asking twice sees the same stock.
        assert!(calculator.has_stock(&item, 100));
        assert_eq!(item.stock, 100);
    }

    #[test]
    fn rejects_unsorted_tier_tables() {
        let tiers = vec![
            DiscountTier { min_quantity: 500, fraction: Decimal::new(5, 2) },
            DiscountTier { min_quantity: 2000, fraction: Decimal::new(15, 2) },
        ];
        let error = PricingCalculator::new(tiers).expect_err("unsorted tiers must be rejected");
        assert!(matches!(error, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn rejects_fractions_outside_the_unit_interval() {
        let tiers = vec![DiscountTier { min_quantity: 500, fraction: Decimal::ONE }];
        assert!(PricingCalculator::new(tiers).is_err());
    }
}
