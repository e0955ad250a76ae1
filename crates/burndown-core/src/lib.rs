//! burndown-core: milestone burndown forecasting.
//!
//! Items flow through [`labels::decode_labels`] and
//! [`stats::StageStats::classify`], then [`projection::forecast`] turns the
//! stage totals into three rate/end-date projections using the business-day
//! math in [`calendar`].
//!
//! # Conventions
//!
//! - **Errors**: library operations return [`error::BurndownError`]; config
//!   loading uses `anyhow::Result` with context.
//! - **Logging**: use `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod calendar;
pub mod config;
pub mod error;
pub mod ingest;
pub mod labels;
pub mod model;
pub mod projection;
pub mod stats;

pub use error::{BurndownError, ErrorCode};
pub use model::item::{Milestone, State, WorkItem};
pub use projection::{BurndownReport, Outcome, RatePolicy, RateProjection, forecast};
pub use stats::{StageStats, Tally};
