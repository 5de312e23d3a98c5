use crate::github::models::*;
use crate::github::pagination::{next_page_url, Paginated};
use anyhow::{anyhow, Context, Result};
use reqwest::blocking::{Client as HttpClient, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";
const PER_PAGE: &str = "100";

/// Connection settings for the GitHub REST API
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub api_url: String,
    /// `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: None,
        }
    }
}

/// GitHub client abstraction
pub enum GitHubClient {
    Real(RealGitHub),
    #[cfg(test)]
    Mock(MockGitHub),
}

impl GitHubClient {
    /// Create a new real GitHub client authenticated with `token`
    pub fn new(token: &str, options: &ClientOptions) -> Result<Self> {
        Ok(GitHubClient::Real(RealGitHub::new(token, options)?))
    }

    /// Create a mock client for testing
    #[cfg(test)]
    pub fn mock() -> Self {
        GitHubClient::Mock(MockGitHub::new())
    }

    /// Search issues and pull requests, one page per round trip
    pub fn search_issues(&self, query: &str) -> Result<Paginated<'_, SearchIssue>> {
        match self {
            GitHubClient::Real(client) => client.search_issues(query),
            #[cfg(test)]
            GitHubClient::Mock(client) => client.search_issues(query),
        }
    }

    /// Fetch the pull request behind a search result
    pub fn get_pull_request(&self, issue: &SearchIssue) -> Result<PullRequest> {
        match self {
            GitHubClient::Real(client) => client.get_pull_request(issue),
            #[cfg(test)]
            GitHubClient::Mock(client) => client.get_pull_request(issue),
        }
    }

    /// Fetch outstanding review requests, users first then teams
    pub fn get_review_requests(&self, pr: &PullRequest) -> Result<Vec<Reviewer>> {
        match self {
            GitHubClient::Real(client) => client.get_review_requests(pr),
            #[cfg(test)]
            GitHubClient::Mock(client) => client.get_review_requests(pr),
        }
    }

    /// Fetch the review history of a pull request
    pub fn get_reviews(&self, pr: &PullRequest) -> Paginated<'_, Review> {
        match self {
            GitHubClient::Real(client) => client.get_reviews(pr),
            #[cfg(test)]
            GitHubClient::Mock(client) => client.get_reviews(pr),
        }
    }
}

/// Real GitHub client over the REST API
pub struct RealGitHub {
    client: HttpClient,
    api_url: String,
}

impl RealGitHub {
    /// Create a new real GitHub client
    pub fn new(token: &str, options: &ClientOptions) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(anyhow!("GitHub token is empty"));
        }

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .context("Invalid GitHub token format")?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        let client = HttpClient::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(options.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(RealGitHub {
            client,
            api_url: options.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Issue a GET and parse the JSON body, returning the next page link if any
    fn get_page<T: DeserializeOwned>(&self, url: &str) -> Result<(T, Option<String>)> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to send request to {}", url))?;

        let next = next_page_url(response.headers());
        let body = self.handle_response(response)?;
        Ok((body, next))
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.get_page(url).map(|(body, _)| body)
    }

    /// Follow `Link: rel="next"` headers starting from `first_url`
    fn paginate<P, T>(&self, first_url: String, into_items: fn(P) -> Vec<T>) -> Paginated<'_, T>
    where
        P: DeserializeOwned + 'static,
        T: 'static,
    {
        let mut next_url = Some(first_url);
        Paginated::new(move || {
            let Some(url) = next_url.take() else {
                return Ok(None);
            };
            let (page, next) = self.get_page::<P>(&url)?;
            next_url = next;
            Ok(Some(into_items(page)))
        })
    }

    /// Handle API response
    fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text().context("Failed to read response body")?;

        if status.is_success() {
            serde_json::from_str(&body).context("Failed to parse GitHub API response")
        } else if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&body) {
            Err(anyhow!(
                "GitHub API error ({}): {}",
                status,
                error_response.message
            ))
        } else {
            Err(anyhow!("GitHub API error ({}): {}", status, body))
        }
    }

    pub fn search_issues(&self, query: &str) -> Result<Paginated<'_, SearchIssue>> {
        let url = Url::parse_with_params(
            &format!("{}/search/issues", self.api_url),
            &[("q", query), ("per_page", PER_PAGE)],
        )
        .with_context(|| format!("Invalid API URL: {}", self.api_url))?;

        Ok(self.paginate(url.to_string(), search_items))
    }

    pub fn get_pull_request(&self, issue: &SearchIssue) -> Result<PullRequest> {
        let link = issue
            .pull_request
            .as_ref()
            .ok_or_else(|| anyhow!("Search result #{} is not a pull request", issue.number))?;

        self.get_json(&link.url)
            .with_context(|| format!("Failed to fetch pull request #{}", issue.number))
    }

    pub fn get_review_requests(&self, pr: &PullRequest) -> Result<Vec<Reviewer>> {
        let url = format!("{}/requested_reviewers", pr.url);
        let requests: ReviewRequests = self
            .get_json(&url)
            .with_context(|| format!("Failed to fetch review requests for #{}", pr.number))?;

        Ok(requests.into_reviewers())
    }

    pub fn get_reviews(&self, pr: &PullRequest) -> Paginated<'_, Review> {
        let url = format!("{}/reviews?per_page={}", pr.url, PER_PAGE);
        self.paginate(url, |reviews: Vec<Review>| reviews)
    }
}

fn search_items(results: SearchResults) -> Vec<SearchIssue> {
    if results.incomplete_results {
        warn!(
            "GitHub reported incomplete search results ({} total matches)",
            results.total_count
        );
    }
    results.items
}

/// Mock GitHub client for testing
#[cfg(test)]
pub struct MockGitHub {
    pub issues: Vec<SearchIssue>,
    pub pull_requests: Vec<PullRequest>,
    pub review_requests: Vec<(u64, ReviewRequests)>, // (pr_number, requests)
    pub reviews: Vec<(u64, Vec<Review>)>,            // (pr_number, reviews)
    pub page_size: usize,
    /// Every API call made, in order
    pub calls: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl MockGitHub {
    pub fn new() -> Self {
        MockGitHub {
            issues: vec![],
            pull_requests: vec![],
            review_requests: vec![],
            reviews: vec![],
            page_size: 30,
            calls: std::cell::RefCell::new(vec![]),
        }
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn paginate<'a, T: Clone>(&'a self, label: String, items: &'a [T]) -> Paginated<'a, T> {
        let mut pages = items.chunks(self.page_size.max(1));
        let mut page = 0;
        Paginated::new(move || {
            let next = pages.next().map(<[T]>::to_vec);
            if next.is_some() {
                page += 1;
                self.record(format!("{} page {}", label, page));
            }
            Ok(next)
        })
    }

    pub fn search_issues(&self, query: &str) -> Result<Paginated<'_, SearchIssue>> {
        Ok(self.paginate(format!("search {}", query), &self.issues))
    }

    pub fn get_pull_request(&self, issue: &SearchIssue) -> Result<PullRequest> {
        if issue.pull_request.is_none() {
            return Err(anyhow!("Search result #{} is not a pull request", issue.number));
        }
        self.record(format!("pull {}", issue.number));
        self.pull_requests
            .iter()
            .find(|pr| pr.number == issue.number)
            .cloned()
            .ok_or_else(|| anyhow!("PR #{} not found", issue.number))
    }

    pub fn get_review_requests(&self, pr: &PullRequest) -> Result<Vec<Reviewer>> {
        self.record(format!("requested_reviewers {}", pr.number));
        Ok(self
            .review_requests
            .iter()
            .find(|(num, _)| *num == pr.number)
            .map(|(_, requests)| requests.clone())
            .unwrap_or_default()
            .into_reviewers())
    }

    pub fn get_reviews(&self, pr: &PullRequest) -> Paginated<'_, Review> {
        let reviews = self
            .reviews
            .iter()
            .find(|(num, _)| *num == pr.number)
            .map(|(_, reviews)| reviews.as_slice())
            .unwrap_or(&[]);
        self.paginate(format!("reviews {}", pr.number), reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_mock_search_paginates() {
        let mut mock = MockGitHub::new();
        mock.page_size = 2;
        mock.issues = (1..=5).map(create_test_issue).collect();

        let client = GitHubClient::Mock(mock);
        let numbers: Vec<u64> = client
            .search_issues("is:pr")
            .unwrap()
            .map(|issue| issue.unwrap().number)
            .collect();

        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);

        let GitHubClient::Mock(mock) = &client else {
            unreachable!()
        };
        assert_eq!(
            *mock.calls.borrow(),
            vec!["search is:pr page 1", "search is:pr page 2", "search is:pr page 3"]
        );
    }

    #[test]
    fn test_mock_review_requests_default_to_empty() {
        let client = GitHubClient::mock();
        let pr = create_test_pull_request(9);

        assert!(client.get_review_requests(&pr).unwrap().is_empty());
        assert_eq!(client.get_reviews(&pr).count(), 0);
    }

    #[test]
    fn test_non_pull_request_is_rejected() {
        let mut mock = MockGitHub::new();
        let mut issue = create_test_issue(3);
        issue.pull_request = None;
        mock.pull_requests.push(create_test_pull_request(3));

        let client = GitHubClient::Mock(mock);
        let err = client.get_pull_request(&issue).unwrap_err();
        assert!(err.to_string().contains("#3 is not a pull request"));
    }

    #[test]
    fn test_real_client_rejects_empty_token() {
        assert!(RealGitHub::new("  ", &ClientOptions::default()).is_err());
    }
}
