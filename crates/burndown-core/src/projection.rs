//! Burn rates and projected completion dates.
//!
//! Three policies disagree on what counts as done. Each one turns completed
//! hours into a rate per elapsed business day, then walks the remaining open
//! hours forward from today at that rate.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::calendar::{add_business_days, elapsed_business_days};
use crate::error::BurndownError;
use crate::model::item::WorkItem;
use crate::stats::StageStats;

/// Which stages count as completed work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatePolicy {
    /// Closed + test + in-progress.
    Optimistic,
    /// Closed + test.
    Moderate,
    /// Closed only.
    Conservative,
}

impl RatePolicy {
    pub const ALL: [Self; 3] = [Self::Optimistic, Self::Moderate, Self::Conservative];

    /// Stable machine name, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Optimistic => "optimistic",
            Self::Moderate => "moderate",
            Self::Conservative => "conservative",
        }
    }

    /// Display label naming the stages that count as done.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Optimistic => "Closed + Test + In Progress",
            Self::Moderate => "Closed + Test",
            Self::Conservative => "Closed",
        }
    }

    #[must_use]
    pub const fn completed_hours(self, stats: &StageStats) -> u64 {
        match self {
            Self::Optimistic => stats.closed.hours + stats.test.hours + stats.in_progress.hours,
            Self::Moderate => stats.closed.hours + stats.test.hours,
            Self::Conservative => stats.closed.hours,
        }
    }
}

impl fmt::Display for RatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a policy has no projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedReason {
    /// No hours count as completed under this policy yet.
    NoCompletedWork,
    /// The milestone has not been running for a single business day.
    NoElapsedBusinessDays,
    /// The rate is so low that the end date falls past the last
    /// representable calendar day.
    BeyondCalendar,
}

impl UndefinedReason {
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::NoCompletedWork => "no completed work yet",
            Self::NoElapsedBusinessDays => "no business days elapsed",
            Self::BeyondCalendar => "end date is past the supported calendar",
        }
    }
}

/// A rate and end date, or the reason none can be given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Projected {
        /// Completed hours per business day.
        burndown_rate: f64,
        end_date: NaiveDate,
    },
    Undefined { reason: UndefinedReason },
}

impl Outcome {
    #[must_use]
    pub const fn end_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Projected { end_date, .. } => Some(*end_date),
            Self::Undefined { .. } => None,
        }
    }

    #[must_use]
    pub const fn burndown_rate(&self) -> Option<f64> {
        match self {
            Self::Projected { burndown_rate, .. } => Some(*burndown_rate),
            Self::Undefined { .. } => None,
        }
    }
}

/// Projection for one policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateProjection {
    pub policy: RatePolicy,
    pub label: &'static str,
    pub completed_hours: u64,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Everything a burndown report needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BurndownReport {
    pub start_date: NaiveDate,
    pub today: NaiveDate,
    pub worked_days: f64,
    pub stats: StageStats,
    pub projections: Vec<RateProjection>,
}

impl BurndownReport {
    #[must_use]
    pub fn projection(&self, policy: RatePolicy) -> Option<&RateProjection> {
        self.projections.iter().find(|p| p.policy == policy)
    }
}

/// Project one policy given the elapsed business days.
///
/// # Errors
///
/// An end date past the supported calendar is reported as
/// [`UndefinedReason::BeyondCalendar`], not as an error. Other calendar
/// errors propagate.
pub fn project_rate(
    policy: RatePolicy,
    stats: &StageStats,
    worked_days: f64,
    today: NaiveDate,
) -> Result<RateProjection, BurndownError> {
    let completed_hours = policy.completed_hours(stats);

    let outcome = if worked_days <= 0.0 {
        Outcome::Undefined {
            reason: UndefinedReason::NoElapsedBusinessDays,
        }
    } else if completed_hours == 0 {
        Outcome::Undefined {
            reason: UndefinedReason::NoCompletedWork,
        }
    } else {
        #[allow(clippy::cast_precision_loss)]
        let burndown_rate = completed_hours as f64 / worked_days;
        #[allow(clippy::cast_precision_loss)]
        let remaining_days = stats.open.hours as f64 / burndown_rate;
        match add_business_days(today, remaining_days) {
            Ok(end_date) => Outcome::Projected {
                burndown_rate,
                end_date,
            },
            Err(BurndownError::DateOutOfRange(_)) => Outcome::Undefined {
                reason: UndefinedReason::BeyondCalendar,
            },
            Err(err) => return Err(err),
        }
    };

    Ok(RateProjection {
        policy,
        label: policy.label(),
        completed_hours,
        outcome,
    })
}

/// Project all three policies from already-classified stats.
///
/// # Errors
///
/// Returns [`BurndownError::InvalidDateOrder`] when `start` is after `today`.
pub fn project(
    stats: StageStats,
    start: NaiveDate,
    today: NaiveDate,
) -> Result<BurndownReport, BurndownError> {
    let worked_days = elapsed_business_days(start, today)?;

    let projections = RatePolicy::ALL
        .into_iter()
        .map(|policy| project_rate(policy, &stats, worked_days, today))
        .collect::<Result<Vec<_>, _>>()?;

    for projection in &projections {
        if let Outcome::Undefined { reason } = projection.outcome {
            tracing::info!(
                policy = %projection.policy,
                reason = reason.describe(),
                "burndown projection undefined"
            );
        }
    }

    Ok(BurndownReport {
        start_date: start,
        today,
        worked_days,
        stats,
        projections,
    })
}

/// Classify `items` and project all policies.
///
/// # Errors
///
/// See [`project`].
pub fn forecast(
    items: &[WorkItem],
    start: NaiveDate,
    today: NaiveDate,
) -> Result<BurndownReport, BurndownError> {
    project(StageStats::classify(items), start, today)
}
