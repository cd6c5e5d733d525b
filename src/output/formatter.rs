use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::github::types::PullRequest;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// A PR decorated with its age strings, as handed to the template
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    #[serde(flatten)]
    pub pr: PullRequest,
    pub created_str: String,
    pub merged_str: Option<String>,
}

/// Whole days elapsed from `then` to `now`, rounded down.
///
/// A `then` in the future yields a negative count.
pub fn days_between(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - then).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Format a day count as "recently", "N day ago" or "N days ago".
///
/// The singular form is chosen by the last digit: 1, 21, 31, ... are "day",
/// 11 is "days".
pub fn age_to_text(days: i64) -> String {
    if days == 0 {
        "recently".to_string()
    } else if days % 10 == 1 && days != 11 {
        format!("{} day ago", days)
    } else {
        format!("{} days ago", days)
    }
}

/// Attach age strings to every PR, with ages measured against `now`
pub fn enrich(prs: Vec<PullRequest>, now: DateTime<Utc>) -> Vec<ReportEntry> {
    prs.into_iter()
        .map(|pr| {
            let created_str = age_to_text(days_between(pr.created_at, now));
            let merged_str = pr
                .merged_at
                .map(|merged_at| age_to_text(days_between(merged_at, now)));
            ReportEntry {
                pr,
                created_str,
                merged_str,
            }
        })
        .collect()
}
