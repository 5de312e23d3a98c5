//! Tagged TSV records written to stdout.
//!
//! Each line starts with a tag naming the record shape so a loader can split
//! a mixed stream into the `pull_request_info`, `pull_request_comment` and
//! `pull_request_assignment` tables.

use crate::github::{PullRequest, Review, Reviewer, User};
use crate::time::format_timestamp;
use jiff::Timestamp;
use std::fmt;

pub const PR_INFO_TAG: &str = "PRINFO";
pub const PR_COMMENT_TAG: &str = "PRCOMMENT";
pub const PR_ASSIGNMENT_TAG: &str = "PRASSIGNMENT";

pub const PR_INFO_COLUMNS: &[&str] = &[
    "repo_tag",
    "pr_num",
    "author",
    "state",
    "adds",
    "deletes",
    "review_comments",
    "created_at",
    "merged_at",
    "closed_at",
    "url",
];

pub const PR_COMMENT_COLUMNS: &[&str] = &[
    "repo_tag",
    "pr_num",
    "review_id",
    "login",
    "state",
    "submitted_at",
    "url",
];

pub const PR_ASSIGNMENT_COLUMNS: &[&str] = &[
    "repo_tag",
    "pr_num",
    "assignment_type",
    "name",
    "name_type",
];

/// Placeholder for accounts that no longer exist
pub const MISSING_USER: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentType {
    Assigned,
    Reviewer,
}

impl AssignmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentType::Assigned => "ASSIGNED",
            AssignmentType::Reviewer => "REVIEWER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameType {
    User,
    Team,
}

impl NameType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NameType::User => "USER",
            NameType::Team => "TEAM",
        }
    }
}

/// One row per pull request
#[derive(Debug, Clone, PartialEq)]
pub struct PrInfo {
    pub repo_tag: String,
    pub pr_num: u64,
    pub author: String,
    pub state: String,
    pub adds: u64,
    pub deletes: u64,
    pub review_comments: u64,
    pub created_at: Option<Timestamp>,
    pub merged_at: Option<Timestamp>,
    pub closed_at: Option<Timestamp>,
    pub url: String,
}

impl PrInfo {
    pub fn from_pull_request(repo_tag: &str, pr: &PullRequest) -> Self {
        PrInfo {
            repo_tag: repo_tag.to_string(),
            pr_num: pr.number,
            author: login_or_missing(pr.user.as_ref()),
            state: pr.state.as_str().to_string(),
            adds: pr.additions,
            deletes: pr.deletions,
            review_comments: pr.review_comments,
            created_at: pr.created_at,
            merged_at: pr.merged_at,
            closed_at: pr.closed_at,
            url: pr.html_url.clone(),
        }
    }
}

/// One row per submitted review
#[derive(Debug, Clone, PartialEq)]
pub struct PrComment {
    pub repo_tag: String,
    pub pr_num: u64,
    pub review_id: u64,
    pub login: String,
    pub state: String,
    pub submitted_at: Option<Timestamp>,
    pub url: String,
}

impl PrComment {
    pub fn from_review(repo_tag: &str, pr_num: u64, review: &Review) -> Self {
        PrComment {
            repo_tag: repo_tag.to_string(),
            pr_num,
            review_id: review.id,
            login: login_or_missing(review.user.as_ref()),
            state: review.state.clone(),
            submitted_at: review.submitted_at,
            url: review.html_url.clone(),
        }
    }
}

/// One row per assignee or requested reviewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrAssignment {
    pub repo_tag: String,
    pub pr_num: u64,
    pub assignment_type: AssignmentType,
    pub name: String,
    pub name_type: NameType,
}

impl PrAssignment {
    pub fn assignee(repo_tag: &str, pr_num: u64, user: &User) -> Self {
        PrAssignment {
            repo_tag: repo_tag.to_string(),
            pr_num,
            assignment_type: AssignmentType::Assigned,
            name: user.login.clone(),
            name_type: NameType::User,
        }
    }

    pub fn reviewer(repo_tag: &str, pr_num: u64, reviewer: &Reviewer) -> Self {
        let (name, name_type) = match reviewer {
            Reviewer::User { login } => (login.clone(), NameType::User),
            Reviewer::Team { name } => (name.clone(), NameType::Team),
        };

        PrAssignment {
            repo_tag: repo_tag.to_string(),
            pr_num,
            assignment_type: AssignmentType::Reviewer,
            name,
            name_type,
        }
    }
}

/// Any of the three output records
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Info(PrInfo),
    Comment(PrComment),
    Assignment(PrAssignment),
}

impl Record {
    pub fn tag(&self) -> &'static str {
        match self {
            Record::Info(_) => PR_INFO_TAG,
            Record::Comment(_) => PR_COMMENT_TAG,
            Record::Assignment(_) => PR_ASSIGNMENT_TAG,
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Record::Info(_) => PR_INFO_COLUMNS,
            Record::Comment(_) => PR_COMMENT_COLUMNS,
            Record::Assignment(_) => PR_ASSIGNMENT_COLUMNS,
        }
    }

    /// Column values in the order of [`Record::columns`]
    pub fn fields(&self) -> Vec<String> {
        match self {
            Record::Info(info) => vec![
                info.repo_tag.clone(),
                info.pr_num.to_string(),
                info.author.clone(),
                info.state.clone(),
                info.adds.to_string(),
                info.deletes.to_string(),
                info.review_comments.to_string(),
                format_timestamp(info.created_at),
                format_timestamp(info.merged_at),
                format_timestamp(info.closed_at),
                info.url.clone(),
            ],
            Record::Comment(comment) => vec![
                comment.repo_tag.clone(),
                comment.pr_num.to_string(),
                comment.review_id.to_string(),
                comment.login.clone(),
                comment.state.clone(),
                format_timestamp(comment.submitted_at),
                comment.url.clone(),
            ],
            Record::Assignment(assignment) => vec![
                assignment.repo_tag.clone(),
                assignment.pr_num.to_string(),
                assignment.assignment_type.as_str().to_string(),
                assignment.name.clone(),
                assignment.name_type.as_str().to_string(),
            ],
        }
    }
}

impl fmt::Display for Record {
    /// Tag followed by the fields, tab separated, without a line terminator
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())?;
        for field in self.fields() {
            write!(f, "\t{}", field)?;
        }
        Ok(())
    }
}

impl From<PrInfo> for Record {
    fn from(info: PrInfo) -> Self {
        Record::Info(info)
    }
}

impl From<PrComment> for Record {
    fn from(comment: PrComment) -> Self {
        Record::Comment(comment)
    }
}

impl From<PrAssignment> for Record {
    fn from(assignment: PrAssignment) -> Self {
        Record::Assignment(assignment)
    }
}

fn login_or_missing(user: Option<&User>) -> String {
    user.map(|u| u.login.clone())
        .unwrap_or_else(|| MISSING_USER.to_string())
}
