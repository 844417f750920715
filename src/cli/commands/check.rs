//! grasshopper check - Check for a newer release

use chrono::DateTime;
use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, json_ok};
use crate::error::Result;
use crate::updater::{UpdateChecker, UpdateDecision, spawn_update_check};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Installed version to compare against (defaults to this build)
    #[arg(long, value_name = "VERSION")]
    pub current: Option<String>,

    /// Startup-style check: honours `update.auto_check`, runs on a background
    /// worker and stays silent when the release server cannot be reached
    #[arg(long)]
    pub auto: bool,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    current_version: String,
    repo: String,
    /// False when the check was disabled or the fetch failed in `--auto` mode.
    checked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    decision: Option<UpdateDecision>,
}

pub fn run(ctx: &AppContext, args: &CheckArgs) -> Result<()> {
    let current = args
        .current
        .clone()
        .unwrap_or_else(|| crate::VERSION.to_string());
    let checker = UpdateChecker::from_config(current, &ctx.config.update);

    let decision = if args.auto {
        if ctx.config.update.auto_check {
            // A failed fetch disconnects the channel without a message.
            spawn_update_check(checker.clone())?.recv().ok()
        } else {
            info!("Update check disabled in config");
            None
        }
    } else {
        Some(checker.check()?)
    };

    let report = CheckReport {
        current_version: checker.current_version().to_string(),
        repo: checker.repo().to_string(),
        checked: decision.is_some(),
        decision,
    };

    match ctx.output_format {
        OutputFormat::Json => emit_json(&json_ok(&report)),
        format => {
            if let Some(layout) = human_report(&report, format) {
                emit_human(layout);
            }
            Ok(())
        }
    }
}

fn human_report(report: &CheckReport, format: OutputFormat) -> Option<HumanLayout> {
    let decision = report.decision.as_ref()?;
    let mut layout = HumanLayout::new(format);

    match decision {
        UpdateDecision::UpdateAvailable {
            tag,
            url,
            published_at,
        } => {
            let headline = format!(
                "The current app version is {}. A new version is available:",
                report.current_version
            );
            layout
                .title(&headline)
                .blank()
                .push_line(format!("{tag} (published {})", display_date(published_at)))
                .blank();
            if format.use_colors() {
                layout.push_line(style(url).underlined().to_string());
            } else {
                layout.push_line(url.clone());
            }
        }
        UpdateDecision::NoUpdate { reason } => {
            layout
                .kv("current version", &report.current_version)
                .kv("repository", &report.repo)
                .kv("result", reason.as_str());
        }
    }

    Some(layout)
}

/// RFC 3339 timestamps are shortened to their date; anything else is shown as-is.
fn display_date(published_at: &str) -> String {
    DateTime::parse_from_rfc3339(published_at).map_or_else(
        |_| published_at.to_string(),
        |dt| dt.format("%Y-%m-%d").to_string(),
    )
}
