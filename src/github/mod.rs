pub mod client;
pub mod query;
pub mod types;

use anyhow::Result;

pub use client::GhCli;
pub use types::{Author, OrderDirection, PrState, PullRequest, RepoParseError, RepositoryRef};

/// Anything that can list the pull requests of one repository.
pub trait PullRequestSource {
    fn query(
        &self,
        repo: &RepositoryRef,
        state: PrState,
        direction: OrderDirection,
    ) -> Result<Vec<PullRequest>>;
}

impl<T: PullRequestSource + ?Sized> PullRequestSource for &T {
    fn query(
        &self,
        repo: &RepositoryRef,
        state: PrState,
        direction: OrderDirection,
    ) -> Result<Vec<PullRequest>> {
        (**self).query(repo, state, direction)
    }
}
