use chrono::{DateTime, Utc};

use crate::github::types::PullRequest;
use crate::output::days_between;

/// Keep only PRs authored by one of `allowed_logins`.
///
/// An empty allow-list keeps everything. With a non-empty list, PRs whose
/// author is absent never match.
pub fn filter_by_authors(prs: Vec<PullRequest>, allowed_logins: &[String]) -> Vec<PullRequest> {
    if allowed_logins.is_empty() {
        return prs;
    }

    prs.into_iter()
        .filter(|pr| {
            pr.author_login()
                .is_some_and(|login| allowed_logins.iter().any(|allowed| allowed == login))
        })
        .collect()
}

/// Keep merged PRs whose merge happened fewer than `max_age_days` whole days
/// before `now`. PRs without a merge time are dropped.
pub fn keep_recently_merged(
    prs: Vec<PullRequest>,
    max_age_days: i64,
    now: DateTime<Utc>,
) -> Vec<PullRequest> {
    prs.into_iter()
        .filter(|pr| {
            pr.merged_at
                .is_some_and(|merged_at| days_between(merged_at, now) < max_age_days)
        })
        .collect()
}
