use std::time::Instant;

use rust_decimal::Decimal;
use serde::Serialize;

use bidforge_core::config::{AppConfig, LoadOptions};
use bidforge_core::{BidOutcome, Catalog, InMemoryAuditSink, PipelineCoordinator, Product, Rfp, Sku};

use crate::commands::CommandResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum SmokeStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct SmokeCheck {
    name: &'static str,
    status: SmokeStatus,
    elapsed_ms: u64,
    message: String,
}

#[derive(Debug, Serialize)]
struct SmokeReport {
    command: &'static str,
    status: SmokeStatus,
    summary: String,
    total_elapsed_ms: u64,
    checks: Vec<SmokeCheck>,
}

pub fn run() -> CommandResult {
    let started = Instant::now();
    let mut checks = Vec::new();

    let config = match timed(|| AppConfig::load(LoadOptions::default())) {
        (elapsed_ms, Ok(config)) => {
            checks.push(SmokeCheck {
                name: "config_validation",
                status: SmokeStatus::Pass,
                elapsed_ms,
                message: "configuration loaded and validated".to_string(),
            });
            config
        }
        (elapsed_ms, Err(error)) => {
            checks.push(SmokeCheck {
                name: "config_validation",
                status: SmokeStatus::Fail,
                elapsed_ms,
                message: error.to_string(),
            });
            checks.push(skipped("marine_scenario"));
            checks.push(skipped("insufficient_stock_scenario"));
            checks.push(skipped("fallback_quantity"));
            return finalize(checks, started.elapsed().as_millis() as u64);
        }
    };

    let coordinator = match PipelineCoordinator::from_config(&config.pipeline) {
        Ok(coordinator) => coordinator,
        Err(error) => {
            checks.push(SmokeCheck {
                name: "marine_scenario",
                status: SmokeStatus::Fail,
                elapsed_ms: 0,
                message: format!("coordinator failed to build: {error}"),
            });
            checks.push(skipped("insufficient_stock_scenario"));
            checks.push(skipped("fallback_quantity"));
            return finalize(checks, started.elapsed().as_millis() as u64);
        }
    };

    let (elapsed_ms, message, ok) = timed_scenario(|| marine_scenario(&coordinator));
    checks.push(SmokeCheck {
        name: "marine_scenario",
        status: if ok { SmokeStatus::Pass } else { SmokeStatus::Fail },
        elapsed_ms,
        message,
    });

    let (elapsed_ms, message, ok) = timed_scenario(|| insufficient_stock_scenario(&coordinator));
    checks.push(SmokeCheck {
        name: "insufficient_stock_scenario",
        status: if ok { SmokeStatus::Pass } else { SmokeStatus::Fail },
        elapsed_ms,
        message,
    });

    let (elapsed_ms, message, ok) = timed_scenario(|| fallback_quantity_scenario(&coordinator));
    checks.push(SmokeCheck {
        name: "fallback_quantity",
        status: if ok { SmokeStatus::Pass } else { SmokeStatus::Fail },
        elapsed_ms,
        message,
    });

    finalize(checks, started.elapsed().as_millis() as u64)
}

fn marine_catalog(stock: u32) -> Result<Catalog, String> {
    Catalog::new(vec![Product {
        sku: Sku("CT-001".to_owned()),
        name: "Marine Grade Protective Coating".to_owned(),
        specs: "saltwater-resistant, marine grade".to_owned(),
        unit_price: Decimal::new(12_500, 2),
        stock,
    }])
    .map_err(|error| error.to_string())
}

fn marine_rfp() -> Rfp {
    Rfp::new(
        "SMOKE-001",
        "Smoke Test",
        "800 liters of marine-grade protective coating, saltwater-resistant",
        chrono::NaiveDate::from_ymd_opt(2024, 12, 3).expect("valid date"),
    )
}

fn marine_scenario(coordinator: &PipelineCoordinator) -> Result<String, String> {
    let catalog = marine_catalog(1500)?;
    let sink = InMemoryAuditSink::default();
    let mut rfp = marine_rfp();

    let outcome =
        coordinator.process(&catalog, &mut rfp, &sink).map_err(|error| error.to_string())?;
    let bid = outcome.bid().ok_or_else(|| "expected a bid, got a terminal failure".to_owned())?;

    if bid.quantity != 800 {
        return Err(format!("expected quantity 800, got {}", bid.quantity));
    }
    if bid.pricing.discount_fraction != Decimal::new(5, 2) {
        return Err(format!("expected 5% tier, got {}", bid.pricing.discount_fraction));
    }
    if bid.pricing.total != Decimal::new(9_500_000, 2) {
        return Err(format!("expected total 95000.00, got {}", bid.pricing.total));
    }
    if bid.confidence > 95 {
        return Err(format!("confidence {} exceeds the cap", bid.confidence));
    }
    Ok(format!("bid total {} at confidence {}%", bid.pricing.total, bid.confidence))
}

fn insufficient_stock_scenario(coordinator: &PipelineCoordinator) -> Result<String, String> {
    let catalog = marine_catalog(100)?;
    let sink = InMemoryAuditSink::default();
    let mut rfp = marine_rfp();

    let outcome =
        coordinator.process(&catalog, &mut rfp, &sink).map_err(|error| error.to_string())?;
    match outcome {
        BidOutcome::InsufficientStock { requested: 800, available: 100 } => {
            Ok("insufficient stock reported, no bid produced".to_owned())
        }
        other => Err(format!("expected InsufficientStock, got {other:?}")),
    }
}

fn fallback_quantity_scenario(coordinator: &PipelineCoordinator) -> Result<String, String> {
    let catalog = marine_catalog(1500)?;
    let sink = InMemoryAuditSink::default();
    let mut rfp = Rfp::new(
        "SMOKE-002",
        "Smoke Test",
        "marine-grade protective coating, saltwater-resistant",
        chrono::NaiveDate::from_ymd_opt(2024, 12, 3).expect("valid date"),
    );

    let outcome =
        coordinator.process(&catalog, &mut rfp, &sink).map_err(|error| error.to_string())?;
    let bid = outcome.bid().ok_or_else(|| "expected a bid, got a terminal failure".to_owned())?;
    if bid.quantity != 500 {
        return Err(format!("expected fallback quantity 500, got {}", bid.quantity));
    }
    Ok("fallback quantity applied".to_owned())
}

fn timed<T>(check: impl FnOnce() -> T) -> (u64, T) {
    let started = Instant::now();
    let result = check();
    (started.elapsed().as_millis() as u64, result)
}

fn timed_scenario(check: impl FnOnce() -> Result<String, String>) -> (u64, String, bool) {
    let (elapsed_ms, result) = timed(check);
    match result {
        Ok(message) => (elapsed_ms, message, true),
        Err(message) => (elapsed_ms, message, false),
    }
}

fn skipped(name: &'static str) -> SmokeCheck {
    SmokeCheck {
        name,
        status: SmokeStatus::Skipped,
        elapsed_ms: 0,
        message: "skipped due to earlier failure".to_string(),
    }
}

fn finalize(checks: Vec<SmokeCheck>, total_elapsed_ms: u64) -> CommandResult {
    let failed = checks.iter().filter(|check| check.status == SmokeStatus::Fail).count();
    let status = if failed == 0 { SmokeStatus::Pass } else { SmokeStatus::Fail };
    let report = SmokeReport {
        command: "smoke",
        status,
        summary: if failed == 0 {
            format!("{} checks passed", checks.len())
        } else {
            format!("{failed} of {} checks failed", checks.len())
        },
        total_elapsed_ms,
        checks,
    };

    let output = serde_json::to_string_pretty(&report)
        .unwrap_or_else(|error| format!("smoke report serialization failed: {error}"));
    CommandResult { exit_code: if failed == 0 { 0 } else { 1 }, output }
}
