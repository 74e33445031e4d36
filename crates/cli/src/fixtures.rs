//! Demo fixtures: the fixed product catalog and a batch of sample RFPs.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use bidforge_core::{Catalog, DomainError, Product, Rfp, Sku};

pub fn product_catalog() -> Result<Catalog, DomainError> {
    Catalog::new(vec![
        product(
            "PT-001",
            "Premium Exterior Gloss Paint",
            "Water-resistant, high-gloss, UV protection, exterior grade",
            Decimal::new(4_599, 2),
            5000,
        ),
        product(
            "PT-002",
            "Industrial Anti-Corrosion Coating",
            "High-viscosity, rust-proof, industrial grade, chemical resistant",
            Decimal::new(8_950, 2),
            3000,
        ),
        product(
            "PT-003",
            "Eco-Friendly Interior Paint",
            "Low-VOC, matte finish, interior use, quick-dry",
            Decimal::new(3_875, 2),
            8000,
        ),
        product(
            "SV-001",
            "Heavy-Duty Industrial Solvent",
            "Fast-evaporating, industrial grade, multi-purpose cleaner",
            Decimal::new(5_230, 2),
            2500,
        ),
        product(
            "CT-001",
            "Marine Grade Protective Coating",
            "Saltwater-resistant, high-durability, weatherproof, marine grade",
            Decimal::new(12_500, 2),
            1500,
        ),
        product(
            "PT-004",
            "High-Gloss Automotive Paint",
            "High-gloss, fast-dry, automotive grade, color-stable",
            Decimal::new(6_780, 2),
            4000,
        ),
        product(
            "PT-005",
            "Warehouse Floor Epoxy Coating",
            "Industrial strength, chemical resistant, non-slip, heavy-traffic",
            Decimal::new(9_525, 2),
            2200,
        ),
        product(
            "SV-002",
            "Paint Thinner Professional Grade",
            "Quick-dry formula, low odor, professional grade",
            Decimal::new(2_850, 2),
            6000,
        ),
        product(
            "PT-006",
            "Fire-Resistant Industrial Coating",
            "Flame-retardant, high-temperature resistant, industrial grade",
            Decimal::new(15_600, 2),
            1200,
        ),
        product(
            "CT-002",
            "Waterproofing Membrane Coating",
            "100% waterproof, flexible, crack-bridging, long-lasting",
            Decimal::new(7_890, 2),
            3500,
        ),
    ])
}

pub fn sample_rfps() -> Vec<Rfp> {
    vec![
        Rfp::new(
            "RFP-2024-001",
            "Coastal Construction Ltd",
            "We require 500 liters of high-gloss exterior paint suitable for coastal \
             conditions. Must be weather-resistant and UV protected. Delivery needed by \
             Q3 2024.",
            date(2024, 12, 1),
        ),
        Rfp::new(
            "RFP-2024-002",
            "Marine Industries Corp",
            "Looking for 800 liters of marine-grade protective coating for ship hulls. \
             Must be saltwater-resistant and highly durable. Budget: $100,000.",
            date(2024, 12, 3),
        ),
        Rfp::new(
            "RFP-2024-003",
            "AutoTech Manufacturing",
            "Need 1200 liters of automotive-grade high-gloss paint for production line. \
             Fast-dry formula essential. Delivery within 30 days.",
            date(2024, 12, 5),
        ),
        Rfp::new(
            "RFP-2024-004",
            "Industrial Warehouse Solutions",
            "Require 2000 liters of epoxy floor coating for warehouse facility. Must be \
             chemical resistant and suitable for heavy forklift traffic.",
            date(2024, 12, 7),
        ),
        Rfp::new(
            "RFP-2024-005",
            "FireSafe Construction",
            "Need 600 liters of fire-resistant coating for industrial building project. \
             Must meet fire safety regulations and high-temperature specifications.",
            date(2024, 12, 9),
        ),
    ]
}

fn product(sku: &str, name: &str, specs: &str, unit_price: Decimal, stock: u32) -> Product {
    Product {
        sku: Sku(sku.to_owned()),
        name: name.to_owned(),
        specs: specs.to_owned(),
        unit_price,
        stock,
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("fixture dates are valid")
}
