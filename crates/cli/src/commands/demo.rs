use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use bidforge_core::config::{AppConfig, LoadOptions};
use bidforge_core::{BidOutcome, InMemoryAuditSink, PipelineCoordinator, RfpId};

use crate::commands::CommandResult;
use crate::{fixtures, render};

#[derive(Debug, Serialize)]
struct DemoReport {
    processed: usize,
    bids_generated: usize,
    manual_review: Vec<RfpId>,
}

/// Run the pipeline over the sample RFPs, print a summary banner per bid, and
/// export each bid as JSON into `out_dir`.
pub fn run(out_dir: &Path) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "demo",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let coordinator = match PipelineCoordinator::from_config(&config.pipeline) {
        Ok(coordinator) => coordinator,
        Err(error) => {
            return CommandResult::failure("demo", "pipeline_init", error.to_string(), 2);
        }
    };

    let catalog = match fixtures::product_catalog() {
        Ok(catalog) => catalog,
        Err(error) => {
            return CommandResult::failure("demo", "fixture_load", error.to_string(), 2);
        }
    };

    if let Err(error) = fs::create_dir_all(out_dir) {
        return CommandResult::failure(
            "demo",
            "io",
            format!("could not create `{}`: {error}", out_dir.display()),
            4,
        );
    }

    info!(products = catalog.len(), "loaded fixture catalog");

    let mut rfps = fixtures::sample_rfps();
    let mut report =
        DemoReport { processed: 0, bids_generated: 0, manual_review: Vec::new() };

    for rfp in &mut rfps {
        info!(rfp_id = %rfp.id, client = %rfp.client, "processing rfp");
        let sink = InMemoryAuditSink::default();

        let outcome = match coordinator.process(&catalog, rfp, &sink) {
            Ok(outcome) => outcome,
            Err(error) => {
                return CommandResult::failure("demo", "malformed_input", error.to_string(), 3);
            }
        };
        report.processed += 1;

        for event in sink.events() {
            println!("{}", render::audit_line(&event));
        }

        match outcome {
            BidOutcome::Bid(bid) => {
                println!("{}", render::bid_summary(&bid));

                let path = out_dir.join(format!("bid_{}.json", bid.rfp.id));
                let json = match serde_json::to_string_pretty(&bid) {
                    Ok(json) => json,
                    Err(error) => {
                        return CommandResult::failure(
                            "demo",
                            "serialization",
                            error.to_string(),
                            4,
                        );
                    }
                };
                if let Err(error) = fs::write(&path, json) {
                    return CommandResult::failure(
                        "demo",
                        "io",
                        format!("could not write `{}`: {error}", path.display()),
                        4,
                    );
                }
                report.bids_generated += 1;
            }
            BidOutcome::NoMatch => {
                info!(rfp_id = %rfp.id, "no suitable products found");
                report.manual_review.push(rfp.id.clone());
            }
            BidOutcome::InsufficientStock { requested, available } => {
                info!(
                    rfp_id = %rfp.id,
                    requested,
                    available,
                    "insufficient stock for this bid"
                );
                report.manual_review.push(rfp.id.clone());
            }
        }
    }

    let message = serde_json::to_string(&report)
        .unwrap_or_else(|_| format!("{} bids generated", report.bids_generated));
    CommandResult::success("demo", message)
}
