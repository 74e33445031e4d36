use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::product::Product;
use crate::domain::rfp::Rfp;
use crate::pricing::PricingBreakdown;

/// A finalized proposal. Built only by the coordinator after every pipeline
/// stage has passed; never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub rfp: Rfp,
    pub product: Product,
    pub quantity: u32,
    pub pricing: PricingBreakdown,
    pub confidence: u8,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    use crate::domain::product::{Product, Sku};
    use crate::domain::rfp::{Rfp, RfpStatus};
    use crate::pricing::{DiscountTier, PricingCalculator};

    use super::Bid;

    #[test]
    fn bid_serializes_with_snake_case_status_and_decimal_money() {
        let product = Product {
            sku: Sku("CT-001".to_owned()),
            name: "Marine Grade Protective Coating".to_owned(),
            specs: "Saltwater-resistant, marine grade".to_owned(),
            unit_price: Decimal::new(12_500, 2),
            stock: 1500,
        };
        let mut rfp = Rfp::new(
            "RFP-2024-002",
            "Marine Industries Corp",
            "800 liters of marine-grade coating",
            NaiveDate::from_ymd_opt(2024, 12, 3).expect("valid date"),
        );
        rfp.status = RfpStatus::Matched;

        let pricing = PricingCalculator::new(DiscountTier::default_tiers())
            .expect("default tiers are valid")
            .price(&product, 800);
        let bid = Bid {
            rfp,
            product,
            quantity: 800,
            pricing,
            confidence: 95,
            generated_at: Utc::now(),
        };

        let json = serde_json::to_value(&bid).expect("bid serializes");
        assert_eq!(json["rfp"]["status"], "matched");
        assert_eq!(json["quantity"], 800);
        assert_eq!(json["pricing"]["total"], "95000.00");
    }
}
