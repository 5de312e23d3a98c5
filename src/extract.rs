use crate::github::{GitHubClient, SearchIssue};
use crate::records::{PrAssignment, PrComment, PrInfo, Record};
use anyhow::{Context, Result};
use std::io::Write;
use tracing::{debug, info};

/// Counts of what an extraction run emitted
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractStats {
    pub pull_requests: usize,
    pub info_records: usize,
    pub comment_records: usize,
    pub assignment_records: usize,
}

impl ExtractStats {
    pub fn total_records(&self) -> usize {
        self.info_records + self.comment_records + self.assignment_records
    }
}

/// Turns search results into tagged records, writing each line as soon as it
/// is built.
pub struct Extractor<'a, W: Write> {
    client: &'a GitHubClient,
    repo_tag: &'a str,
    out: W,
    stats: ExtractStats,
}

impl<'a, W: Write> Extractor<'a, W> {
    pub fn new(client: &'a GitHubClient, repo_tag: &'a str, out: W) -> Self {
        Extractor {
            client,
            repo_tag,
            out,
            stats: ExtractStats::default(),
        }
    }

    /// Process every search result in order. Stops at the first error.
    pub fn run<I>(mut self, issues: I) -> Result<ExtractStats>
    where
        I: IntoIterator<Item = Result<SearchIssue>>,
    {
        for issue in issues {
            let issue = issue.context("Failed to fetch search results")?;
            self.extract_one(&issue)?;
        }
        Ok(self.stats)
    }

    /// Emit assignments, review requests, PR info and reviews for one result
    pub fn extract_one(&mut self, issue: &SearchIssue) -> Result<()> {
        let pr = self.client.get_pull_request(issue)?;
        debug!("Processing PR #{} created {}", pr.number, issue.created_at);

        for assignee in &pr.assignees {
            self.emit(PrAssignment::assignee(self.repo_tag, pr.number, assignee).into())?;
        }

        for reviewer in self.client.get_review_requests(&pr)? {
            self.emit(PrAssignment::reviewer(self.repo_tag, pr.number, &reviewer).into())?;
        }

        self.emit(PrInfo::from_pull_request(self.repo_tag, &pr).into())?;

        for review in self.client.get_reviews(&pr) {
            let review =
                review.with_context(|| format!("Failed to fetch reviews for #{}", pr.number))?;
            self.emit(PrComment::from_review(self.repo_tag, pr.number, &review).into())?;
        }

        self.stats.pull_requests += 1;
        Ok(())
    }

    pub fn stats(&self) -> ExtractStats {
        self.stats
    }

    fn emit(&mut self, record: Record) -> Result<()> {
        writeln!(self.out, "{}", record).context("Failed to write record")?;
        self.out.flush().context("Failed to flush output")?;

        match record {
            Record::Info(_) => self.stats.info_records += 1,
            Record::Comment(_) => self.stats.comment_records += 1,
            Record::Assignment(_) => self.stats.assignment_records += 1,
        }
        Ok(())
    }
}

/// Search with `query` and write every record for `repo_tag` to `out`
pub fn extract_and_format<W: Write>(
    client: &GitHubClient,
    repo_tag: &str,
    query: &str,
    out: W,
) -> Result<ExtractStats> {
    let issues = client
        .search_issues(query)
        .context("Failed to search pull requests")?;

    let stats = Extractor::new(client, repo_tag, out).run(issues)?;

    info!(
        "Extracted {} pull requests ({} records)",
        stats.pull_requests,
        stats.total_records()
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{MockGitHub, ReviewRequests, Team, User};
    use crate::test_utils::*;

    fn run(mock: MockGitHub) -> (String, ExtractStats, Vec<String>) {
        let client = GitHubClient::Mock(mock);
        let mut out = Vec::new();
        let stats = extract_and_format(&client, "org/repo", "is:pr", &mut out).unwrap();

        let GitHubClient::Mock(mock) = client else {
            unreachable!()
        };
        let calls = mock.calls.into_inner();
        (String::from_utf8(out).unwrap(), stats, calls)
    }

    fn tags(output: &str) -> Vec<&str> {
        output
            .lines()
            .map(|line| line.split('\t').next().unwrap())
            .collect()
    }

    #[test]
    fn test_pull_request_without_assignments() {
        let mut mock = MockGitHub::new();
        mock.issues.push(create_test_issue(1));
        mock.pull_requests.push(create_test_pull_request(1));

        let (output, stats, _) = run(mock);

        assert_eq!(tags(&output), vec!["PRINFO"]);
        assert_eq!(stats.assignment_records, 0);
        assert_eq!(stats.info_records, 1);
        assert_eq!(stats.pull_requests, 1);
    }

    #[test]
    fn test_reviews_in_source_order() {
        let mut mock = MockGitHub::new();
        mock.issues.push(create_test_issue(1));
        mock.pull_requests.push(create_test_pull_request(1));
        mock.reviews.push((
            1,
            vec![
                create_test_review(100, "alice", "APPROVED"),
                create_test_review(101, "bob", "COMMENTED"),
            ],
        ));

        let (output, stats, _) = run(mock);
        let comments: Vec<Vec<&str>> = output
            .lines()
            .filter(|line| line.starts_with("PRCOMMENT\t"))
            .map(|line| line.split('\t').collect())
            .collect();

        assert_eq!(stats.comment_records, 2);
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0][3], "100");
        assert_eq!(comments[0][5], "APPROVED");
        assert_eq!(comments[1][3], "101");
        assert_eq!(comments[1][5], "COMMENTED");
    }

    #[test]
    fn test_emission_order_within_pull_request() {
        let mut mock = MockGitHub::new();
        mock.issues.push(create_test_issue(5));

        let mut pr = create_test_pull_request(5);
        pr.assignees = vec![User {
            login: "owner".to_string(),
        }];
        mock.pull_requests.push(pr);
        mock.review_requests.push((
            5,
            ReviewRequests {
                users: vec![User {
                    login: "reviewer".to_string(),
                }],
                teams: vec![Team {
                    name: "Platform".to_string(),
                    slug: Some("platform".to_string()),
                }],
            },
        ));
        mock.reviews
            .push((5, vec![create_test_review(9, "reviewer", "CHANGES_REQUESTED")]));

        let (output, stats, _) = run(mock);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            tags(&output),
            vec!["PRASSIGNMENT", "PRASSIGNMENT", "PRASSIGNMENT", "PRINFO", "PRCOMMENT"]
        );
        assert_eq!(lines[0], "PRASSIGNMENT\torg/repo\t5\tASSIGNED\towner\tUSER");
        assert_eq!(lines[1], "PRASSIGNMENT\torg/repo\t5\tREVIEWER\treviewer\tUSER");
        assert_eq!(lines[2], "PRASSIGNMENT\torg/repo\t5\tREVIEWER\tPlatform\tTEAM");
        assert_eq!(stats.total_records(), 5);
    }

    #[test]
    fn test_search_pages_are_fetched_lazily() {
        let mut mock = MockGitHub::new();
        mock.page_size = 1;
        for number in 1..=2 {
            mock.issues.push(create_test_issue(number));
            mock.pull_requests.push(create_test_pull_request(number));
        }
        mock.reviews.push((1, vec![create_test_review(1, "alice", "APPROVED")]));

        let (_, stats, calls) = run(mock);

        assert_eq!(stats.pull_requests, 2);
        assert_eq!(
            calls,
            vec![
                "search is:pr page 1",
                "pull 1",
                "requested_reviewers 1",
                "reviews 1 page 1",
                "search is:pr page 2",
                "pull 2",
                "requested_reviewers 2",
            ]
        );
    }

    #[test]
    fn test_partial_output_survives_failure() {
        let mut mock = MockGitHub::new();
        mock.issues.push(create_test_issue(1));
        mock.issues.push(create_test_issue(2));
        mock.pull_requests.push(create_test_pull_request(1));

        let client = GitHubClient::Mock(mock);
        let mut out = Vec::new();
        let err = extract_and_format(&client, "org/repo", "is:pr", &mut out).unwrap_err();

        assert!(err.to_string().contains("PR #2 not found"));
        let output = String::from_utf8(out).unwrap();
        assert_eq!(tags(&output), vec!["PRINFO"]);
    }

    #[test]
    fn test_extract_one_updates_stats() {
        let mut mock = MockGitHub::new();
        mock.pull_requests.push(create_merged_pull_request(3));
        let client = GitHubClient::Mock(mock);

        let mut out = Vec::new();
        let mut extractor = Extractor::new(&client, "org/repo", &mut out);
        extractor.extract_one(&create_test_issue(3)).unwrap();

        assert_eq!(extractor.stats().pull_requests, 1);
        assert_eq!(extractor.stats().info_records, 1);
    }
}
