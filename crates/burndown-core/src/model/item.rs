use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Tracker lifecycle state of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Open,
    Closed,
}

impl State {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// Milestone an item belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    pub title: String,
}

/// A tracked ticket as read from an issue export.
///
/// `labels` keeps the export's order; duplicates are tolerated and collapsed
/// when decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub state: State,
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<Milestone>,
}

impl WorkItem {
    /// Build an item from a state and label names, with no milestone.
    pub fn new<I, S>(state: State, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            number: None,
            title: None,
            state,
            labels: labels.into_iter().map(Into::into).collect(),
            milestone: None,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.state, State::Open)
    }

    /// Title of the owning milestone, if any.
    #[must_use]
    pub fn milestone_title(&self) -> Option<&str> {
        self.milestone.as_ref().map(|m| m.title.as_str())
    }
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for State {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseEnumError {
                expected: "state",
                got: s.to_string(),
            }),
        }
    }
}

/// Keep only items whose milestone title matches `title` exactly.
///
/// Items without a milestone never match.
#[must_use]
pub fn filter_by_milestone(items: Vec<WorkItem>, title: &str) -> Vec<WorkItem> {
    let before = items.len();
    let kept: Vec<WorkItem> = items
        .into_iter()
        .filter(|item| item.milestone_title() == Some(title))
        .collect();
    tracing::debug!(
        milestone = title,
        before,
        after = kept.len(),
        "filtered items by milestone"
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::{Milestone, State, WorkItem, filter_by_milestone};
    use std::str::FromStr;

    fn in_milestone(title: &str) -> WorkItem {
        let mut item = WorkItem::new(State::Open, ["est-1"]);
        item.milestone = Some(Milestone {
            number: Some(19),
            title: title.to_string(),
        });
        item
    }

    #[test]
    fn state_json_roundtrips() {
        assert_eq!(serde_json::to_string(&State::Open).unwrap(), "\"open\"");
        assert_eq!(
            serde_json::from_str::<State>("\"closed\"").unwrap(),
            State::Closed
        );
    }

    #[test]
    fn state_parse_is_case_insensitive() {
        assert_eq!(State::from_str("OPEN").unwrap(), State::Open);
        assert_eq!(State::from_str(" closed ").unwrap(), State::Closed);
        let err = State::from_str("reopened").unwrap_err();
        assert_eq!(err.to_string(), "invalid state: 'reopened'");
    }

    #[test]
    fn milestone_filter_keeps_exact_title_matches() {
        let items = vec![
            in_milestone("Sprint 19"),
            in_milestone("Sprint 20"),
            WorkItem::new(State::Closed, Vec::<String>::new()),
            in_milestone("Sprint 19"),
        ];

        let kept = filter_by_milestone(items, "Sprint 19");
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|i| i.milestone_title() == Some("Sprint 19")));
    }
}
