use std::fmt;

use chrono::NaiveDate;
use std::path::PathBuf;

/// Machine-readable error codes for scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    MissingStartDate,
    MalformedItem,
    InputParseError,
    InvalidDateOrder,
    NonFiniteOffset,
    DateOutOfRange,
    InputReadFailed,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::MissingStartDate => "E1002",
            Self::MalformedItem => "E2001",
            Self::InputParseError => "E2002",
            Self::InvalidDateOrder => "E3001",
            Self::NonFiniteOffset => "E3002",
            Self::DateOutOfRange => "E3003",
            Self::InputReadFailed => "E5001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::MissingStartDate => "Milestone start date not set",
            Self::MalformedItem => "Malformed work item",
            Self::InputParseError => "Item export is not valid JSON",
            Self::InvalidDateOrder => "Start date is after end date",
            Self::NonFiniteOffset => "Business-day offset is not finite",
            Self::DateOutOfRange => "Date out of supported range",
            Self::InputReadFailed => "Failed to read item export",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in burndown.toml and retry."),
            Self::MissingStartDate => {
                Some("Pass --start YYYY-MM-DD or set [milestone] start_date in burndown.toml.")
            }
            Self::MalformedItem => {
                Some("Every item needs a `state` (open|closed) and a `labels` array.")
            }
            Self::InputParseError => Some("Provide a JSON array of issue objects."),
            Self::InvalidDateOrder => Some("Use a milestone start date on or before today."),
            Self::NonFiniteOffset | Self::DateOutOfRange => None,
            Self::InputReadFailed => Some("Check the --items path and read permissions."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised by the burndown library.
#[derive(Debug, thiserror::Error)]
pub enum BurndownError {
    /// An item in the export is missing a required field or has a bad value.
    #[error("item #{index} is malformed: {reason}")]
    MalformedItem { index: usize, reason: String },

    /// The export could not be decoded as a JSON array.
    #[error("invalid item export: {0}")]
    InputParse(#[from] serde_json::Error),

    /// `start` lies after `end` in an elapsed-days computation.
    #[error("start date {start} is after end date {end}")]
    InvalidDateOrder { start: NaiveDate, end: NaiveDate },

    /// A business-day offset was NaN or infinite.
    #[error("business-day offset {0} is not finite")]
    NonFiniteOffset(f64),

    /// Advancing a date ran past the last representable calendar day.
    #[error("advancing from {0} ran past the supported date range")]
    DateOutOfRange(NaiveDate),

    /// A config file exists but is not valid TOML for its schema.
    #[error("failed to parse {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// No milestone start date on the command line or in config.
    #[error("milestone start date is not set")]
    MissingStartDate,

    /// The item export could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BurndownError {
    /// Catalogue code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedItem { .. } => ErrorCode::MalformedItem,
            Self::InputParse(_) => ErrorCode::InputParseError,
            Self::InvalidDateOrder { .. } => ErrorCode::InvalidDateOrder,
            Self::NonFiniteOffset(_) => ErrorCode::NonFiniteOffset,
            Self::DateOutOfRange(_) => ErrorCode::DateOutOfRange,
            Self::Config { .. } => ErrorCode::ConfigParseError,
            Self::MissingStartDate => ErrorCode::MissingStartDate,
            Self::ReadInput { .. } => ErrorCode::InputReadFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BurndownError, ErrorCode};
    use chrono::NaiveDate;
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::ConfigParseError,
            ErrorCode::MissingStartDate,
            ErrorCode::MalformedItem,
            ErrorCode::InputParseError,
            ErrorCode::InvalidDateOrder,
            ErrorCode::NonFiniteOffset,
            ErrorCode::DateOutOfRange,
            ErrorCode::InputReadFailed,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::MalformedItem.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn errors_map_to_catalogue_codes() {
        let start = NaiveDate::from_ymd_opt(2015, 5, 20).unwrap();
        let end = NaiveDate::from_ymd_opt(2015, 5, 15).unwrap();
        let err = BurndownError::InvalidDateOrder { start, end };
        assert_eq!(err.code(), ErrorCode::InvalidDateOrder);
        assert_eq!(
            err.to_string(),
            "start date 2015-05-20 is after end date 2015-05-15"
        );

        let err = BurndownError::MalformedItem {
            index: 3,
            reason: "missing `state`".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::MalformedItem);
        assert_eq!(err.to_string(), "item #3 is malformed: missing `state`");
    }
}
