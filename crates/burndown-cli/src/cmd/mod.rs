pub mod calendar;
pub mod completions;
pub mod report;
