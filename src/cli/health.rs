//! Health command implementation

use crate::cli::{AppContext, HealthArgs};
use crate::probe::ProbeOutcome;
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;

#[derive(Serialize)]
pub struct HealthReport {
    pub backend: String,
    pub status: String,
    pub last_awake_ms: Option<i64>,
    pub recently_awake: bool,
    pub waking_up: bool,
}

/// Handle `podesk health`
///
/// Issues one probe (which also advances the wakefulness mark on success)
/// and reports the resilience layer's view of the backend.
pub async fn handle_health(
    args: &HealthArgs,
    ctx: &AppContext,
) -> Result<String, Box<dyn std::error::Error>> {
    let outcome = ctx.monitor.probe_now().await;

    let report = HealthReport {
        backend: ctx.config.api.base_url.clone(),
        status: match outcome {
            ProbeOutcome::Awake => "awake".to_string(),
            ProbeOutcome::Unreachable => "unreachable".to_string(),
        },
        last_awake_ms: ctx.tracker.last_awake_ms(),
        recently_awake: ctx.tracker.is_recently_awake(),
        waking_up: ctx.monitor.is_waking_up(),
    };

    if args.json {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(format_health_pretty(&report))
    }
}

/// Format the report as pretty text
fn format_health_pretty(report: &HealthReport) -> String {
    let mut output = String::new();

    let status_display = if report.status == "awake" {
        "Awake".green()
    } else {
        "Unreachable".red()
    };

    writeln!(output, "Backend: {}", report.backend).ok();
    writeln!(output, "Status: {}", status_display).ok();

    match report.last_awake_ms {
        Some(ms) => {
            let when = chrono::DateTime::from_timestamp_millis(ms)
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_else(|| ms.to_string());
            writeln!(output, "Last confirmed awake: {}", when).ok();
        }
        None => {
            writeln!(output, "Last confirmed awake: never").ok();
        }
    }

    writeln!(
        output,
        "Within grace window: {}",
        if report.recently_awake { "yes" } else { "no" }
    )
    .ok();

    if report.waking_up {
        writeln!(output, "{}", "A wake cycle is active.".yellow()).ok();
    }

    output
}
