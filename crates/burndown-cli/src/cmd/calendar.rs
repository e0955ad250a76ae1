//! `burndown days` and `burndown add-days`: the business-day calculator on
//! its own, for checking a forecast by hand.

use std::io::{self, Write};

use burndown_core::calendar::{add_business_days, elapsed_business_days};
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use crate::output::{OutputMode, pretty_kv, render_mode};

/// Arguments for `burndown days`.
#[derive(Args, Debug)]
pub struct DaysArgs {
    /// First day of the range (inclusive).
    #[arg(long, value_name = "DATE")]
    pub from: NaiveDate,

    /// Last day of the range (exclusive).
    #[arg(long, value_name = "DATE")]
    pub to: NaiveDate,
}

/// Arguments for `burndown add-days`.
#[derive(Args, Debug)]
pub struct AddDaysArgs {
    /// Date to count from.
    #[arg(long, value_name = "DATE")]
    pub from: NaiveDate,

    /// Business days to add. Fractions round up to a whole day.
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub days: f64,
}

#[derive(Debug, Serialize)]
struct DaysPayload {
    from: NaiveDate,
    to: NaiveDate,
    business_days: f64,
}

#[derive(Debug, Serialize)]
struct AddDaysPayload {
    from: NaiveDate,
    days: f64,
    date: NaiveDate,
}

/// Execute `burndown days`.
pub fn run_days(args: &DaysArgs, output: OutputMode) -> anyhow::Result<()> {
    let business_days = elapsed_business_days(args.from, args.to)?;
    let payload = DaysPayload {
        from: args.from,
        to: args.to,
        business_days,
    };

    render_mode(
        output,
        &payload,
        |p, w| writeln!(w, "business_days: {}", p.business_days),
        render_days_pretty,
    )
}

fn render_days_pretty(p: &DaysPayload, w: &mut dyn Write) -> io::Result<()> {
    pretty_kv(w, "From", p.from.format("%a %Y-%m-%d").to_string())?;
    pretty_kv(w, "To", p.to.format("%a %Y-%m-%d").to_string())?;
    pretty_kv(w, "Business days", p.business_days.to_string())
}

/// Execute `burndown add-days`.
pub fn run_add_days(args: &AddDaysArgs, output: OutputMode) -> anyhow::Result<()> {
    let date = add_business_days(args.from, args.days)?;
    let payload = AddDaysPayload {
        from: args.from,
        days: args.days,
        date,
    };

    render_mode(
        output,
        &payload,
        |p, w| writeln!(w, "date: {}", p.date),
        |p, w| {
            pretty_kv(w, "From", p.from.format("%a %Y-%m-%d").to_string())?;
            pretty_kv(w, "Business days", p.days.to_string())?;
            pretty_kv(w, "Lands on", p.date.format("%a %Y-%m-%d").to_string())
        },
    )
}
