//! Reading an already-fetched issue export into [`WorkItem`]s.
//!
//! The export is a JSON array of issue objects. Tracker exports carry labels
//! as objects with a `name` field and milestones as objects; hand-written
//! inputs may use plain strings for both. Missing required fields reject the
//! whole input instead of being defaulted.

use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use crate::error::BurndownError;
use crate::model::item::{Milestone, State, WorkItem};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LabelRef {
    Name(String),
    Object { name: String },
}

impl LabelRef {
    fn into_name(self) -> String {
        match self {
            Self::Name(name) | Self::Object { name } => name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MilestoneRef {
    Title(String),
    Object {
        #[serde(default)]
        number: Option<u64>,
        title: String,
    },
}

impl From<MilestoneRef> for Milestone {
    fn from(raw: MilestoneRef) -> Self {
        match raw {
            MilestoneRef::Title(title) => Self {
                number: None,
                title,
            },
            MilestoneRef::Object { number, title } => Self { number, title },
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(default)]
    number: Option<u64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    labels: Option<Vec<LabelRef>>,
    #[serde(default)]
    milestone: Option<MilestoneRef>,
}

fn malformed(index: usize, reason: impl Into<String>) -> BurndownError {
    BurndownError::MalformedItem {
        index,
        reason: reason.into(),
    }
}

fn convert(index: usize, value: Value) -> Result<WorkItem, BurndownError> {
    let raw: RawItem =
        serde_json::from_value(value).map_err(|err| malformed(index, err.to_string()))?;

    let state = raw
        .state
        .ok_or_else(|| malformed(index, "missing `state`"))?;
    let state = State::from_str(&state).map_err(|err| malformed(index, err.to_string()))?;

    let labels = raw
        .labels
        .ok_or_else(|| malformed(index, "missing `labels`"))?
        .into_iter()
        .map(LabelRef::into_name)
        .collect();

    Ok(WorkItem {
        number: raw.number,
        title: raw.title,
        state,
        labels,
        milestone: raw.milestone.map(Milestone::from),
    })
}

/// Parse an issue export from a JSON string.
///
/// # Errors
///
/// Returns [`BurndownError::InputParse`] if the text is not a JSON array and
/// [`BurndownError::MalformedItem`] for the first item missing `state` or
/// `labels` or carrying an unknown state.
pub fn parse_items(json: &str) -> Result<Vec<WorkItem>, BurndownError> {
    read_items(json.as_bytes())
}

/// Parse an issue export from any reader (file or stdin).
///
/// # Errors
///
/// Same as [`parse_items`]; read failures surface as [`BurndownError::InputParse`].
pub fn read_items(reader: impl Read) -> Result<Vec<WorkItem>, BurndownError> {
    let values: Vec<Value> = serde_json::from_reader(reader)?;
    let items = values
        .into_iter()
        .enumerate()
        .map(|(index, value)| convert(index, value))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(count = items.len(), "read item export");
    Ok(items)
}

/// Open and parse an issue export file.
///
/// # Errors
///
/// Returns [`BurndownError::ReadInput`] if the file cannot be opened, then
/// anything [`read_items`] returns.
pub fn read_items_from_path(path: &Path) -> Result<Vec<WorkItem>, BurndownError> {
    let file = File::open(path).map_err(|source| BurndownError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "opened item export");
    read_items(BufReader::new(file))
}
