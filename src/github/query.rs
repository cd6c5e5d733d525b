use anyhow::{Context, Result};
use serde::Deserialize;

use crate::github::types::{OrderDirection, PrState, PullRequest, RepositoryRef};

/// Maximum number of pull requests requested per repository
pub const PAGE_SIZE: u32 = 100;

/// Build the GraphQL query for one repository.
///
/// `$owner` and `$name` are passed as variables; state and direction are
/// enum literals and go straight into the query text.
pub fn build_query(state: PrState, direction: OrderDirection) -> String {
    format!(
        r#"query ($owner: String!, $name: String!) {{
  repository(owner: $owner, name: $name) {{
    pullRequests(first: {page}, states: {state}, orderBy: {{field: CREATED_AT, direction: {direction}}}) {{
      nodes {{
        title, url, createdAt, mergedAt, isDraft,
        author {{
          ... on User {{
            login, name, avatarUrl
          }}
        }}
      }}
    }}
  }}
}}"#,
        page = PAGE_SIZE,
        state = state.as_graphql(),
        direction = direction.as_graphql(),
    )
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: ResponseData,
}

#[derive(Deserialize)]
struct ResponseData {
    repository: RepositoryNode,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryNode {
    pull_requests: PullRequestConnection,
}

#[derive(Deserialize)]
struct PullRequestConnection {
    nodes: Vec<PullRequest>,
}

/// Extract `data.repository.pullRequests.nodes` from a raw GraphQL response.
///
/// Any other shape is an error, including `repository: null` for a
/// repository that does not exist.
pub fn parse_response(repo: &RepositoryRef, body: &[u8]) -> Result<Vec<PullRequest>> {
    let response: GraphQlResponse = serde_json::from_slice(body)
        .with_context(|| format!("Unexpected GraphQL response for {}", repo))?;
    Ok(response.data.repository.pull_requests.nodes)
}
