//! Console rendering for bids and audit trails. Display only: nothing here
//! is meant to be parsed back for control flow.

use bidforge_core::{AuditEvent, Bid};

pub fn bid_summary(bid: &Bid) -> String {
    let line = "─".repeat(78);
    let double = "═".repeat(78);

    format!(
        "\n{double}\n\
         BID PROPOSAL SUMMARY\n\
         {double}\n\n\
         RFP ID:              {rfp_id}\n\
         Client:              {client}\n\
         Generated:           {generated_at}\n\n\
         {line}\n\
         PRODUCT DETAILS\n\
         {line}\n\
         SKU:                 {sku}\n\
         Product:             {name}\n\
         Specifications:      {specs}\n\
         Quantity:            {quantity} liters\n\n\
         {line}\n\
         PRICING BREAKDOWN\n\
         {line}\n\
         Unit Price:          ${unit_price} per liter\n\
         Base Price:          ${base_price}\n\
         Discount:            {discount_pct}% (${discount_amount})\n\n\
         TOTAL BID:           ${total}\n\
         {line}\n\n\
         Confidence Score:    {confidence}%\n\
         Stock Available:     {stock} liters\n\
         {double}\n",
        rfp_id = bid.rfp.id,
        client = bid.rfp.client,
        generated_at = bid.generated_at.to_rfc3339(),
        sku = bid.product.sku,
        name = bid.product.name,
        specs = bid.product.specs,
        quantity = bid.quantity,
        unit_price = bid.pricing.unit_price,
        base_price = bid.pricing.base_price,
        discount_pct = bid.pricing.discount_fraction * rust_decimal::Decimal::ONE_HUNDRED,
        discount_amount = bid.pricing.discount_amount,
        total = bid.pricing.total,
        confidence = bid.confidence,
        stock = bid.product.stock,
    )
}

pub fn audit_line(event: &AuditEvent) -> String {
    let metadata = event
        .metadata
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "[{}] [{:?}] {} ({:?}) {}",
        event.occurred_at.format("%H:%M:%S"),
        event.stage,
        event.event_type,
        event.outcome,
        metadata
    )
}
