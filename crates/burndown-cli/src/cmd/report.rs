//! `burndown report`: stage totals and completion forecasts for a milestone.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use burndown_core::config::{ReportOverrides, load_project_config, resolve_report_settings};
use burndown_core::ingest::{read_items, read_items_from_path};
use burndown_core::model::item::filter_by_milestone;
use burndown_core::projection::{BurndownReport, Outcome, RateProjection};
use burndown_core::{Tally, WorkItem, forecast};
use chrono::{Datelike, NaiveDate};
use clap::Args;
use serde::Serialize;

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `burndown report`.
#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// Issue export (JSON array). Use `-` for stdin.
    #[arg(long, value_name = "PATH")]
    pub items: Option<PathBuf>,

    /// Milestone start date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub start: Option<NaiveDate>,

    /// Date to forecast from. Defaults to the local calendar date.
    #[arg(long, value_name = "DATE")]
    pub today: Option<NaiveDate>,

    /// Only count items whose milestone has this title.
    #[arg(long, value_name = "TITLE")]
    pub milestone: Option<String>,
}

/// Report payload for `burndown report`.
#[derive(Debug, Serialize)]
pub struct ReportPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<String>,
    #[serde(flatten)]
    pub report: BurndownReport,
}

/// Shown in place of an end date when a rate cannot be projected.
pub const INSUFFICIENT_DATA: &str = "insufficient data";

fn load_items(path: Option<&Path>) -> anyhow::Result<Vec<WorkItem>> {
    match path {
        Some(path) => read_items_from_path(path)
            .with_context(|| format!("failed to load items from {}", path.display())),
        None => {
            tracing::debug!("reading item export from stdin");
            read_items(io::stdin().lock()).context("failed to load items from stdin")
        }
    }
}

/// Execute `burndown report`.
pub fn run_report(args: &ReportArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let config = load_project_config(project_root)?;
    let settings = resolve_report_settings(
        project_root,
        &config,
        ReportOverrides {
            start_date: args.start,
            milestone: args.milestone.clone(),
            items: args.items.clone(),
        },
    )?;

    let mut items = load_items(settings.items.as_deref())?;
    if let Some(title) = settings.milestone.as_deref() {
        items = filter_by_milestone(items, title);
        if items.is_empty() {
            tracing::warn!(milestone = title, "no items matched the milestone");
        }
    }

    let today = args
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let report = forecast(&items, settings.start_date, today)?;

    let payload = ReportPayload {
        milestone: settings.milestone,
        report,
    };

    render_mode(output, &payload, render_report_text, render_report_pretty)
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Long form used in pretty output, e.g. `June 8th, 2015`.
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{} {}{}, {}",
        date.format("%B"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

fn describe_tally(tally: Tally) -> String {
    format!("{} tickets ({}h)", tally.tickets, tally.hours)
}

fn describe_projection_pretty(projection: &RateProjection) -> String {
    match projection.outcome {
        Outcome::Projected {
            burndown_rate,
            end_date,
        } => format!(
            "End: {} (at {burndown_rate:.2}h/day)",
            format_long_date(end_date)
        ),
        Outcome::Undefined { reason } => format!("{INSUFFICIENT_DATA} ({})", reason.describe()),
    }
}

fn render_report_pretty(payload: &ReportPayload, w: &mut dyn Write) -> io::Result<()> {
    let report = &payload.report;
    let stats = &report.stats;

    let heading = payload
        .milestone
        .as_deref()
        .map_or_else(|| "Tickets".to_string(), |m| format!("Tickets: {m}"));
    pretty_section(w, &heading)?;
    pretty_kv(w, "Open", describe_tally(stats.open))?;
    pretty_kv(w, "New", describe_tally(stats.new))?;
    pretty_kv(w, "In Progress", describe_tally(stats.in_progress))?;
    pretty_kv(w, "Test", describe_tally(stats.test))?;
    pretty_kv(w, "Closed", describe_tally(stats.closed))?;

    writeln!(w)?;
    pretty_section(w, "Forecast")?;
    pretty_kv(w, "Started", format_long_date(report.start_date))?;
    pretty_kv(w, "Worked days", report.worked_days.to_string())?;
    for projection in &report.projections {
        pretty_kv(w, projection.label, describe_projection_pretty(projection))?;
    }

    Ok(())
}

fn render_report_text(payload: &ReportPayload, w: &mut dyn Write) -> io::Result<()> {
    let report = &payload.report;
    let stats = &report.stats;

    if let Some(milestone) = &payload.milestone {
        writeln!(w, "milestone: {milestone}")?;
    }
    writeln!(w, "start_date: {}", report.start_date)?;
    writeln!(w, "today: {}", report.today)?;
    writeln!(w, "worked_days: {}", report.worked_days)?;

    for (name, tally) in [
        ("open", stats.open),
        ("new", stats.new),
        ("in_progress", stats.in_progress),
        ("test", stats.test),
        ("closed", stats.closed),
    ] {
        writeln!(w, "{name}: {} tickets {}h", tally.tickets, tally.hours)?;
    }

    for projection in &report.projections {
        let policy = projection.policy.as_str();
        match projection.outcome {
            Outcome::Projected {
                burndown_rate,
                end_date,
            } => writeln!(w, "rate.{policy}: {burndown_rate:.2}h/day end={end_date}")?,
            Outcome::Undefined { reason } => writeln!(
                w,
                "rate.{policy}: {INSUFFICIENT_DATA} ({})",
                reason.describe()
            )?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use burndown_core::State;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn payload(items: &[WorkItem]) -> ReportPayload {
        ReportPayload {
            milestone: Some("Sprint 19".to_string()),
            report: forecast(items, d(2015, 5, 11), d(2015, 5, 25)).unwrap(),
        }
    }

    #[test]
    fn long_dates_use_ordinals() {
        assert_eq!(format_long_date(d(2015, 6, 1)), "June 1st, 2015");
        assert_eq!(format_long_date(d(2015, 6, 2)), "June 2nd, 2015");
        assert_eq!(format_long_date(d(2015, 6, 3)), "June 3rd, 2015");
        assert_eq!(format_long_date(d(2015, 6, 8)), "June 8th, 2015");
        assert_eq!(format_long_date(d(2015, 6, 11)), "June 11th, 2015");
        assert_eq!(format_long_date(d(2015, 6, 12)), "June 12th, 2015");
        assert_eq!(format_long_date(d(2015, 6, 22)), "June 22nd, 2015");
        assert_eq!(format_long_date(d(2015, 5, 31)), "May 31st, 2015");
    }

    #[test]
    fn pretty_output_marks_undefined_rates() {
        let items = vec![WorkItem::new(State::Open, ["est-8"])];
        let mut buf = Vec::new();
        render_report_pretty(&payload(&items), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Tickets: Sprint 19"));
        assert!(text.contains("1 tickets (8h)"));
        assert_eq!(text.matches(INSUFFICIENT_DATA).count(), 3);
        assert!(!text.contains("End:"));
    }

    #[test]
    fn text_output_lists_rates_by_policy() {
        let items = vec![
            WorkItem::new(State::Open, ["est-8"]),
            WorkItem::new(State::Closed, ["est-16"]),
        ];
        let mut buf = Vec::new();
        render_report_text(&payload(&items), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("worked_days: 10\n"));
        assert!(text.contains("closed: 1 tickets 16h\n"));
        // 16h / 10d = 1.6h/day; 8h open = 5 business days -> Monday 2015-06-01.
        assert!(text.contains("rate.conservative: 1.60h/day end=2015-06-01\n"));
    }
}
