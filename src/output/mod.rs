pub mod formatter;

pub use formatter::{age_to_text, days_between, enrich, ReportEntry};
