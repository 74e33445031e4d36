use rust_decimal::Decimal;

use crate::domain::product::{Product, Sku};
use crate::errors::DomainError;

/// Read-only product collection shared across pipeline runs. Item order is
/// load order and is the tie-breaker for ranking.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, DomainError> {
        for product in &products {
            if product.unit_price < Decimal::ZERO {
                return Err(DomainError::InvariantViolation(format!(
                    "product `{}` has a negative unit price",
                    product.sku
                )));
            }
        }
        Ok(Self { products })
    }

    pub fn find(&self, sku: &Sku) -> Option<&Product> {
        self.products.iter().find(|product| &product.sku == sku)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::product::{Product, Sku};
    use crate::errors::DomainError;

    use super::Catalog;

    fn product(sku: &str, price: Decimal) -> Product {
        Product {
            sku: Sku(sku.to_owned()),
            name: "Premium Exterior Gloss Paint".to_owned(),
            specs: "Water-resistant, high-gloss, UV protection".to_owned(),
            unit_price: price,
            stock: 5000,
        }
    }

    #[test]
    fn finds_products_by_sku() {
        let catalog = Catalog::new(vec![product("PT-001", Decimal::new(4_599, 2))])
            .expect("valid catalog");
        assert!(catalog.find(&Sku("PT-001".to_owned())).is_some());
        assert!(catalog.find(&Sku("PT-999".to_owned())).is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn rejects_negative_unit_prices_at_load() {
        let error = Catalog::new(vec![product("PT-001", Decimal::new(-1, 0))])
            .expect_err("negative price must be rejected");
        assert!(matches!(error, DomainError::InvariantViolation(_)));
    }
}
