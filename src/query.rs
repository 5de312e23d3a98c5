use crate::error::InvalidArgument;
use anyhow::Result;
use jiff::civil::Date;

/// Build the `created:` range for a search from optional date bounds.
///
/// `from` is inclusive and `to` is exclusive:
/// - both → `"{from}..{to}"`
/// - only `from` → `">={from}"`
/// - only `to` → `"<{to}"`
///
/// At least one bound is required.
pub fn date_range(from: Option<Date>, to: Option<Date>) -> Result<String, InvalidArgument> {
    match (from, to) {
        (Some(from), Some(to)) => Ok(format!("{}..{}", from, to)),
        (Some(from), None) => Ok(format!(">={}", from)),
        (None, Some(to)) => Ok(format!("<{}", to)),
        (None, None) => Err(InvalidArgument(
            "require 'from_date' or 'to_date'".to_string(),
        )),
    }
}

/// Build the full search query for pull requests created in a date range
pub fn search_query(repo: &str, from: Option<Date>, to: Option<Date>) -> Result<String> {
    let range = date_range(from, to)?;
    Ok(format!("is:pr repo:{} created:{} sort:created-asc", repo, range))
}
