//! Label decoding: size estimates and workflow stage markers.
//!
//! The label vocabulary is fixed and case-sensitive. Labels outside it are
//! carried through in the decoded name list but contribute nothing.

use serde::Serialize;
use std::fmt;

/// Size estimate labels and their hour weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SizeLabel {
    #[serde(rename = "est-64")]
    Est64,
    #[serde(rename = "est-32")]
    Est32,
    #[serde(rename = "est-16")]
    Est16,
    #[serde(rename = "est-8")]
    Est8,
    #[serde(rename = "est-4")]
    Est4,
    #[serde(rename = "est-2")]
    Est2,
    #[serde(rename = "est-1")]
    Est1,
}

impl SizeLabel {
    pub const ALL: [Self; 7] = [
        Self::Est64,
        Self::Est32,
        Self::Est16,
        Self::Est8,
        Self::Est4,
        Self::Est2,
        Self::Est1,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Est64 => "est-64",
            Self::Est32 => "est-32",
            Self::Est16 => "est-16",
            Self::Est8 => "est-8",
            Self::Est4 => "est-4",
            Self::Est2 => "est-2",
            Self::Est1 => "est-1",
        }
    }

    /// Estimated hours carried by this label.
    #[must_use]
    pub const fn hours(self) -> u64 {
        match self {
            Self::Est64 => 64,
            Self::Est32 => 32,
            Self::Est16 => 16,
            Self::Est8 => 8,
            Self::Est4 => 4,
            Self::Est2 => 2,
            Self::Est1 => 1,
        }
    }

    /// Exact-match lookup; returns `None` for anything outside the table.
    #[must_use]
    pub fn from_label(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.as_str() == name)
    }
}

/// Workflow sub-state markers, orthogonal to open/closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StageMarker {
    #[serde(rename = "stt-new")]
    New,
    #[serde(rename = "stt-in-progress")]
    InProgress,
    #[serde(rename = "stt-test")]
    Test,
}

impl StageMarker {
    pub const ALL: [Self; 3] = [Self::New, Self::InProgress, Self::Test];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "stt-new",
            Self::InProgress => "stt-in-progress",
            Self::Test => "stt-test",
        }
    }

    #[must_use]
    pub fn from_label(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|marker| marker.as_str() == name)
    }
}

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for StageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of decoding one item's labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodedLabels {
    /// Label names in first-seen order, duplicates collapsed.
    pub names: Vec<String>,
    /// Sum of the hour weights of every size label present.
    pub hours: u64,
}

impl DecodedLabels {
    #[must_use]
    pub fn has_marker(&self, marker: StageMarker) -> bool {
        self.names.iter().any(|name| name == marker.as_str())
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.names.iter().any(|name| name == label)
    }
}

/// Decode a raw label collection into names and summed hours.
///
/// Several size labels on one item add up; there is no precedence rule.
/// A label repeated in the input is counted once.
pub fn decode_labels<I, S>(labels: I) -> DecodedLabels
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut decoded = DecodedLabels::default();

    for label in labels {
        let name = label.as_ref();
        if decoded.contains(name) {
            continue;
        }
        if let Some(size) = SizeLabel::from_label(name) {
            decoded.hours += size.hours();
        }
        decoded.names.push(name.to_string());
    }

    decoded
}
