//! Builds the mixed fixture graph, freezes a copy, and prints deterministic
//! `key=value` lines for cross-process verification.
//!
//! Usage: `snapshot_fixture`
//! Output:
//!   `source_digest`=sha256:...
//!   `copy_digest`=sha256:...
//!   `report_before`=sha256:...
//!   `report_after`=sha256:...
//!   `containers`=11

use std::process::ExitCode;

use permafrost::{frozen_copy, TraversalPolicyV1, Value};
use permafrost_engine::diagnostics::DiagnosticsReportV1;
use permafrost_kernel::proof::snapshot::structural_digest;
use permafrost_lock_tests::graph_fixtures::mixed_graph;

fn main() -> ExitCode {
    match run() {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("snapshot_fixture: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let policy = TraversalPolicyV1::default();
    let source = Value::from(mixed_graph());

    let before = DiagnosticsReportV1::inspect(&source, &policy)?;
    let copy = frozen_copy(&source);
    let after = DiagnosticsReportV1::inspect(&copy, &policy)?;

    Ok(vec![
        format!("source_digest={}", structural_digest(&source)?),
        format!("copy_digest={}", structural_digest(&copy)?),
        format!("report_before={}", before.digest()?),
        format!("report_after={}", after.digest()?),
        format!("containers={}", after.count.total),
    ])
}
