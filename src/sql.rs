//! Reporting queries for the warehouse tables loaded from the record stream.

/// Tables every query is written against
pub const TABLES: &[&str] = &[
    "rxgithub.pull_request_info",
    "rxgithub.pull_request_comment",
    "rxgithub.pull_request_assignment",
];

/// A named SQL statement shipped with the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlQuery {
    pub name: &'static str,
    pub description: &'static str,
    pub sql: &'static str,
}

macro_rules! sql_query {
    ($name:literal, $description:literal) => {
        SqlQuery {
            name: $name,
            description: $description,
            sql: include_str!(concat!("../sql/", $name, ".sql")),
        }
    };
}

pub const QUERIES: &[SqlQuery] = &[
    sql_query!("schema", "DDL for the three warehouse tables"),
    sql_query!("author_line_changes", "PR count and line changes per author"),
    sql_query!("review_hour_of_day", "Reviews per login by hour of day (US/Pacific)"),
    sql_query!("review_state_counts", "Commented and approved review counts per login"),
    sql_query!("assignment_counts", "Distinct PRs per assignee or reviewer"),
    sql_query!(
        "review_participation_by_year",
        "Share of each year's reviewed PRs a login took part in"
    ),
    sql_query!("approval_participation", "Share of merged PRs each login approved"),
    sql_query!("merged_prs", "All merged pull requests"),
    sql_query!(
        "review_cycle_metrics",
        "Pickup, review and cycle durations for merged PRs"
    ),
    sql_query!(
        "authored_line_changes",
        "Line changes of merged PRs per author since 2022"
    ),
    sql_query!(
        "top_contributors_by_year_state",
        "Top 7 authors by line changes per year and state"
    ),
    sql_query!("top_contributors_by_year", "Top 7 authors by line changes per year"),
    sql_query!("contribution_share", "Each author's share of all line changes"),
    sql_query!("yearly_summary", "Line changes, authors and PRs per year"),
    sql_query!("lines_per_pr_rank", "Authors ranked by line changes per PR each year"),
    sql_query!("monthly_review_events", "Review events per login and month"),
];

/// Look up a bundled query by name
pub fn find(name: &str) -> Option<&'static SqlQuery> {
    QUERIES.iter().find(|query| query.name == name)
}
