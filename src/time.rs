use anyhow::{anyhow, Result};
use jiff::civil::Date;
use jiff::Timestamp;

/// Layout used for every timestamp column in the output
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a `YYYY-MM-DD` calendar date as given on the command line
pub fn parse_date(s: &str) -> Result<Date> {
    let s = s.trim();

    if s.is_empty() {
        return Err(anyhow!("Date cannot be empty"));
    }

    s.parse::<Date>()
        .map_err(|e| anyhow!("Invalid date '{}', expected YYYY-MM-DD: {}", s, e))
}

/// Render a UTC timestamp for a TSV column, or the empty string when absent
pub fn format_timestamp(ts: Option<Timestamp>) -> String {
    ts.map(|ts| ts.strftime(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2022-01-01").unwrap(), date(2022, 1, 1));
        assert_eq!(parse_date(" 2023-12-31 ").unwrap(), date(2023, 12, 31));
    }

    #[test]
    fn test_parse_date_errors() {
        assert!(parse_date("").is_err());
        assert!(parse_date("2022-13-01").is_err());
        assert!(parse_date("2022-02-30").is_err());
        assert!(parse_date("01/01/2022").is_err());
    }

    #[test]
    fn test_format_timestamp() {
        let ts: Timestamp = "2022-03-04T05:06:07Z".parse().unwrap();
        assert_eq!(format_timestamp(Some(ts)), "2022-03-04 05:06:07");
        assert_eq!(format_timestamp(None), "");
    }
}
