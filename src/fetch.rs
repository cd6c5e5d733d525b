use anyhow::Result;
use tracing::debug;

use crate::github::{OrderDirection, PrState, PullRequest, PullRequestSource, RepositoryRef};

/// Fetch PRs in `state` from every repository, in order, and merge them.
///
/// Repositories are queried one after another; the first failure aborts the
/// whole fetch. The combined list is sorted non-drafts first, then by
/// creation time ascending. `direction` only decides which PRs each
/// repository returns when it has more than a page of them; it does not
/// affect the final order.
pub fn fetch_pull_requests<S: PullRequestSource>(
    source: &S,
    repos: &[RepositoryRef],
    state: PrState,
    direction: OrderDirection,
) -> Result<Vec<PullRequest>> {
    let mut all_prs = Vec::new();

    for repo in repos {
        let prs = source.query(repo, state, direction)?;
        debug!("Found {} {} PRs in {}", prs.len(), state.as_graphql(), repo);
        all_prs.extend(prs);
    }

    // Stable: ties keep fetch order
    all_prs.sort_by(|a, b| {
        a.is_draft
            .cmp(&b.is_draft)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });

    Ok(all_prs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use chrono::{DateTime, TimeZone, Utc};
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct FakeSource {
        prs: HashMap<String, Vec<PullRequest>>,
        calls: RefCell<Vec<(String, PrState, OrderDirection)>>,
    }

    impl FakeSource {
        fn new(prs: Vec<(&str, Vec<PullRequest>)>) -> Self {
            Self {
                prs: prs
                    .into_iter()
                    .map(|(repo, prs)| (repo.to_string(), prs))
                    .collect(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl PullRequestSource for FakeSource {
        fn query(
            &self,
            repo: &RepositoryRef,
            state: PrState,
            direction: OrderDirection,
        ) -> Result<Vec<PullRequest>> {
            self.calls
                .borrow_mut()
                .push((repo.to_string(), state, direction));
            self.prs
                .get(&repo.to_string())
                .cloned()
                .ok_or_else(|| anyhow!("no such repository: {}", repo))
        }
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
    }

    fn create_test_pr(title: &str, created_at: DateTime<Utc>, is_draft: bool) -> PullRequest {
        PullRequest {
            title: title.to_string(),
            url: format!("https://github.com/owner/repo/pull/{}", title),
            created_at,
            merged_at: None,
            is_draft,
            author: None,
        }
    }

    fn repos(names: &[&str]) -> Vec<RepositoryRef> {
        names.iter().map(|n| n.parse().unwrap()).collect()
    }

    fn titles(prs: &[PullRequest]) -> Vec<&str> {
        prs.iter().map(|pr| pr.title.as_str()).collect()
    }

    #[test]
    fn test_fetch_sorts_across_repositories() {
        let source = FakeSource::new(vec![
            ("org/r1", vec![create_test_pr("A", at(4), false), create_test_pr("B", at(1), false)]),
            ("org/r2", vec![create_test_pr("C", at(3), false), create_test_pr("D", at(2), false)]),
        ]);

        let prs = fetch_pull_requests(
            &source,
            &repos(&["org/r1", "org/r2"]),
            PrState::Open,
            OrderDirection::Asc,
        )
        .unwrap();

        assert_eq!(titles(&prs), vec!["B", "D", "C", "A"]);
    }

    #[test]
    fn test_fetch_drafts_last() {
        let source = FakeSource::new(vec![(
            "org/r1",
            vec![
                create_test_pr("old-draft", at(1), true),
                create_test_pr("new", at(5), false),
                create_test_pr("old", at(2), false),
            ],
        )]);

        let prs = fetch_pull_requests(&source, &repos(&["org/r1"]), PrState::Open, OrderDirection::Asc)
            .unwrap();

        assert_eq!(titles(&prs), vec!["old", "new", "old-draft"]);
    }

    #[test]
    fn test_fetch_ignores_direction_for_final_order() {
        let source = FakeSource::new(vec![(
            "org/r1",
            vec![create_test_pr("new", at(5), false), create_test_pr("old", at(1), false)],
        )]);

        let prs = fetch_pull_requests(&source, &repos(&["org/r1"]), PrState::Merged, OrderDirection::Desc)
            .unwrap();

        assert_eq!(titles(&prs), vec!["old", "new"]);
    }

    #[test]
    fn test_fetch_ties_keep_fetch_order() {
        let source = FakeSource::new(vec![
            ("org/r1", vec![create_test_pr("first", at(1), false)]),
            ("org/r2", vec![create_test_pr("second", at(1), false)]),
        ]);

        let prs = fetch_pull_requests(
            &source,
            &repos(&["org/r1", "org/r2"]),
            PrState::Open,
            OrderDirection::Asc,
        )
        .unwrap();

        assert_eq!(titles(&prs), vec!["first", "second"]);
    }

    #[test]
    fn test_fetch_queries_in_configuration_order() {
        let source = FakeSource::new(vec![("org/r1", vec![]), ("org/r2", vec![])]);

        fetch_pull_requests(
            &source,
            &repos(&["org/r2", "org/r1"]),
            PrState::Merged,
            OrderDirection::Desc,
        )
        .unwrap();

        let calls = source.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ("org/r2".to_string(), PrState::Merged, OrderDirection::Desc));
        assert_eq!(calls[1], ("org/r1".to_string(), PrState::Merged, OrderDirection::Desc));
    }

    #[test]
    fn test_fetch_failure_aborts_remaining_repositories() {
        let source = FakeSource::new(vec![("org/r2", vec![create_test_pr("C", at(1), false)])]);

        let result = fetch_pull_requests(
            &source,
            &repos(&["org/missing", "org/r2"]),
            PrState::Open,
            OrderDirection::Asc,
        );

        assert!(result.is_err());
        assert_eq!(source.calls.borrow().len(), 1);
    }
}
