//! Stage classification and per-stage totals.

use serde::Serialize;

use crate::labels::{StageMarker, decode_labels};
use crate::model::item::{State, WorkItem};

/// Ticket count and hour total for one stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub tickets: usize,
    pub hours: u64,
}

impl Tally {
    const fn add(&mut self, hours: u64) {
        self.tickets += 1;
        self.hours += hours;
    }
}

/// Per-stage counts for one milestone.
///
/// `open` and `test` partition the open items. `new` and `in_progress` are
/// overlays on open items and may double-count against `open`/`test`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageStats {
    pub open: Tally,
    pub test: Tally,
    pub new: Tally,
    pub in_progress: Tally,
    pub closed: Tally,
}

impl StageStats {
    /// Classify every item in one pass.
    #[must_use]
    pub fn classify(items: &[WorkItem]) -> Self {
        let mut stats = Self::default();
        for item in items {
            stats.record(item);
        }

        tracing::debug!(
            items = items.len(),
            open = stats.open.tickets,
            test = stats.test.tickets,
            closed = stats.closed.tickets,
            hours_open = stats.open.hours,
            "classified items"
        );
        stats
    }

    fn record(&mut self, item: &WorkItem) {
        let decoded = decode_labels(&item.labels);
        let hours = decoded.hours;

        match item.state {
            State::Open => {
                if decoded.has_marker(StageMarker::Test) {
                    self.test.add(hours);
                } else {
                    self.open.add(hours);
                }

                if decoded.has_marker(StageMarker::New) {
                    self.new.add(hours);
                }
                if decoded.has_marker(StageMarker::InProgress) {
                    self.in_progress.add(hours);
                }
            }
            State::Closed => self.closed.add(hours),
        }
    }

    /// Number of items classified.
    #[must_use]
    pub const fn total_tickets(&self) -> usize {
        self.open.tickets + self.test.tickets + self.closed.tickets
    }
}
