pub mod cli;
pub mod config;
pub mod fetch;
pub mod filter;
pub mod github;
pub mod logging;
pub mod output;
pub mod render;
pub mod report;

pub use cli::{run, RunError};
pub use report::{ReportGenerator, ReportRequest};
