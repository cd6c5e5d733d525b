use anyhow::{bail, Context, Result};
use std::process::Command;
use tracing::debug;

use crate::github::query::{build_query, parse_response};
use crate::github::types::{OrderDirection, PrState, PullRequest, RepositoryRef};
use crate::github::PullRequestSource;

/// Default name of the GitHub CLI binary
pub const DEFAULT_GH_BINARY: &str = "gh";

/// Pull request source backed by the pre-authenticated `gh` CLI.
///
/// Each query is one blocking `gh api graphql` invocation.
#[derive(Clone, Debug)]
pub struct GhCli {
    binary: String,
}

impl GhCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn command(&self, repo: &RepositoryRef, query: &str) -> Command {
        // `-f` keeps values as strings; `-F` would turn a repo named "2048" into a number
        let mut cmd = Command::new(&self.binary);
        cmd.args(["api", "graphql", "--paginate"])
            .arg("-f")
            .arg(format!("owner={}", repo.owner))
            .arg("-f")
            .arg(format!("name={}", repo.name))
            .arg("-f")
            .arg(format!("query={}", query));
        cmd
    }
}

impl Default for GhCli {
    fn default() -> Self {
        Self::new(DEFAULT_GH_BINARY)
    }
}

impl PullRequestSource for GhCli {
    fn query(
        &self,
        repo: &RepositoryRef,
        state: PrState,
        direction: OrderDirection,
    ) -> Result<Vec<PullRequest>> {
        let query = build_query(state, direction);
        debug!(repo = %repo, state = state.as_graphql(), "running {} api graphql", self.binary);

        let output = self
            .command(repo, &query)
            .output()
            .with_context(|| format!("Failed to run '{}' for {}", self.binary, repo))?;

        if !output.status.success() {
            bail!(
                "'{} api graphql' failed for {} ({}): {}",
                self.binary,
                repo,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        parse_response(repo, &output.stdout)
    }
}
