use std::fs;
use std::path::Path;

use bidforge_core::Catalog;

use crate::commands::CommandResult;
use crate::fixtures;

pub fn run(output: &Path) -> CommandResult {
    let catalog = match fixtures::product_catalog() {
        Ok(catalog) => catalog,
        Err(error) => {
            return CommandResult::failure(
                "catalog",
                "fixture_load",
                format!("fixture catalog failed to load: {error}"),
                2,
            );
        }
    };

    let csv = match render_csv(&catalog) {
        Ok(csv) => csv,
        Err(error) => {
            return CommandResult::failure("catalog", "csv_render", error.to_string(), 3);
        }
    };

    if let Err(error) = fs::write(output, csv) {
        return CommandResult::failure(
            "catalog",
            "io",
            format!("could not write `{}`: {error}", output.display()),
            4,
        );
    }

    CommandResult::success(
        "catalog",
        format!("exported {} products to {}", catalog.len(), output.display()),
    )
}

pub fn render_csv(catalog: &Catalog) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record(["SKU", "Product_Name", "Technical_Specs", "Unit_Price", "Stock_Level"])?;
    for product in catalog.products() {
        writer.write_record([
            product.sku.0.clone(),
            product.name.clone(),
            product.specs.clone(),
            product.unit_price.to_string(),
            product.stock.to_string(),
        ])?;
    }

    let buffer = writer.into_inner().map_err(|error| anyhow::anyhow!("{error}"))?;
    Ok(String::from_utf8(buffer)?)
}
