use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Repositories as "owner/name"
    #[serde(default)]
    pub repos: Vec<String>,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub merged_days: Option<i64>,
    #[serde(default)]
    pub template: Option<String>,
}
