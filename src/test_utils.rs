//! Test utilities for pr-data-pull
#![cfg(test)]

use crate::github::{
    PullRequest, PullRequestLink, PullRequestState, Review, SearchIssue, User,
};
use jiff::Timestamp;

fn ts(s: &str) -> Timestamp {
    s.parse().unwrap()
}

/// Create a search result pointing at pull request `number` in org/repo
pub fn create_test_issue(number: u64) -> SearchIssue {
    SearchIssue {
        number,
        created_at: ts("2022-01-05T10:00:00Z"),
        html_url: format!("https://github.com/org/repo/pull/{}", number),
        pull_request: Some(PullRequestLink {
            url: format!("https://api.github.com/repos/org/repo/pulls/{}", number),
        }),
    }
}

/// Create an open pull request with no assignees
pub fn create_test_pull_request(number: u64) -> PullRequest {
    PullRequest {
        number,
        state: PullRequestState::Open,
        user: Some(User {
            login: format!("author{}", number),
        }),
        assignees: vec![],
        additions: number * 10,
        deletions: number,
        review_comments: 3,
        created_at: Some(ts("2022-01-05T10:00:00Z")),
        merged_at: None,
        closed_at: None,
        html_url: format!("https://github.com/org/repo/pull/{}", number),
        url: format!("https://api.github.com/repos/org/repo/pulls/{}", number),
    }
}

/// Create a closed pull request merged on 2022-01-06
pub fn create_merged_pull_request(number: u64) -> PullRequest {
    let mut pr = create_test_pull_request(number);
    pr.state = PullRequestState::Closed;
    pr.merged_at = Some(ts("2022-01-06T12:30:00Z"));
    pr.closed_at = Some(ts("2022-01-06T12:30:00Z"));
    pr
}

/// Create a submitted review on pull request #1
pub fn create_test_review(id: u64, login: &str, state: &str) -> Review {
    Review {
        id,
        user: Some(User {
            login: login.to_string(),
        }),
        state: state.to_string(),
        submitted_at: Some(ts("2022-01-06T09:00:00Z")),
        html_url: format!("https://github.com/org/repo/pull/1#pullrequestreview-{}", id),
    }
}
