use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Page of results from `GET /search/issues`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResults {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<SearchIssue>,
}

/// An issue-like item returned by the search API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchIssue {
    pub number: u64,
    pub created_at: Timestamp,
    pub html_url: String,
    /// Present only when the item is a pull request
    pub pull_request: Option<PullRequestLink>,
}

/// Link from an issue to its pull request resource
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PullRequestLink {
    pub url: String,
}

/// Pull request or issue state
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestState {
    Open,
    Closed,
}

impl PullRequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PullRequestState::Open => "open",
            PullRequestState::Closed => "closed",
        }
    }
}

/// Account reference embedded in API payloads
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct User {
    pub login: String,
}

/// Team reference in a review request
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    pub slug: Option<String>,
}

/// Full pull request from `GET /repos/{owner}/{repo}/pulls/{number}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PullRequest {
    pub number: u64,
    pub state: PullRequestState,
    /// `null` when the author account was deleted
    pub user: Option<User>,
    #[serde(default)]
    pub assignees: Vec<User>,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub review_comments: u64,
    pub created_at: Option<Timestamp>,
    pub merged_at: Option<Timestamp>,
    pub closed_at: Option<Timestamp>,
    pub html_url: String,
    /// API URL of the pull request, used to derive sub-resources
    pub url: String,
}

/// Outstanding review requests from `GET .../pulls/{number}/requested_reviewers`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReviewRequests {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub teams: Vec<Team>,
}

/// Someone asked to review a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reviewer {
    User { login: String },
    Team { name: String },
}

impl ReviewRequests {
    /// Flatten into tagged reviewers, users first then teams
    pub fn into_reviewers(self) -> Vec<Reviewer> {
        let users = self
            .users
            .into_iter()
            .map(|user| Reviewer::User { login: user.login });
        let teams = self
            .teams
            .into_iter()
            .map(|team| Reviewer::Team { name: team.name });
        users.chain(teams).collect()
    }
}

/// A submitted (or pending) review on a pull request
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Review {
    pub id: u64,
    /// `null` when the reviewer account was deleted
    pub user: Option<User>,
    /// `APPROVED`, `CHANGES_REQUESTED`, `COMMENTED`, `DISMISSED` or `PENDING`
    pub state: String,
    /// Absent for pending reviews
    pub submitted_at: Option<Timestamp>,
    pub html_url: String,
}

/// Error payload returned by the GitHub API
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub documentation_url: Option<String>,
}
