use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub title: String,
    pub url: String,            // HTML URL, unique within a repository
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>, // Only set for merged PRs
    pub is_draft: bool,
    #[serde(default, deserialize_with = "deserialize_author")]
    pub author: Option<Author>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

impl PullRequest {
    /// Login of the author, if the author is a regular user account
    pub fn author_login(&self) -> Option<&str> {
        self.author.as_ref().map(|a| a.login.as_str())
    }
}

/// Author node as returned by the `... on User` fragment.
///
/// Deleted accounts come back as `null`, bots and other non-user actors as
/// `{}`. Both map to an absent author.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthorNode {
    login: Option<String>,
    name: Option<String>,
    avatar_url: Option<String>,
}

fn deserialize_author<'de, D>(deserializer: D) -> Result<Option<Author>, D::Error>
where
    D: Deserializer<'de>,
{
    let node = Option::<AuthorNode>::deserialize(deserializer)?;
    Ok(node.and_then(|n| {
        n.login.map(|login| Author {
            login,
            name: n.name,
            avatar_url: n.avatar_url,
        })
    }))
}

/// Pull request state to query for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrState {
    Open,
    Merged,
}

impl PrState {
    /// GraphQL enum literal
    pub fn as_graphql(&self) -> &'static str {
        match self {
            PrState::Open => "OPEN",
            PrState::Merged => "MERGED",
        }
    }
}

/// Ordering of the per-repository query by creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn as_graphql(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

/// A repository to fetch from, written as "owner/name"
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoParseError {
    MissingSeparator(String),
    TooManySegments(String),
    EmptySegment(String),
}

impl fmt::Display for RepoParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoParseError::MissingSeparator(s) => {
                write!(f, "invalid repository '{}': expected owner/name", s)
            }
            RepoParseError::TooManySegments(s) => {
                write!(f, "invalid repository '{}': expected exactly one '/'", s)
            }
            RepoParseError::EmptySegment(s) => {
                write!(f, "invalid repository '{}': owner and name must be non-empty", s)
            }
        }
    }
}

impl std::error::Error for RepoParseError {}

impl FromStr for RepositoryRef {
    type Err = RepoParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [_] => Err(RepoParseError::MissingSeparator(s.to_string())),
            [owner, name] => {
                if owner.is_empty() || name.is_empty() {
                    Err(RepoParseError::EmptySegment(s.to_string()))
                } else {
                    Ok(RepositoryRef {
                        owner: owner.to_string(),
                        name: name.to_string(),
                    })
                }
            }
            _ => Err(RepoParseError::TooManySegments(s.to_string())),
        }
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
