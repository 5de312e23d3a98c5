use crate::config::DEFAULT_CONFIG_FILE;
use crate::github::DEFAULT_API_URL;
use clap::{Parser, Subcommand};
use jiff::civil::Date;
use std::ffi::OsString;
use std::path::PathBuf;

/// Repository pulled when `--repo` is not given
pub const DEFAULT_REPO: &str = "XRPLF/rippled";

#[derive(Parser, Debug)]
#[command(
    name = "pr-data-pull",
    about = "Extract pull request, review and assignment data from a GitHub repository",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Inclusive start date of PR creation (YYYY-MM-DD), also -fd
    #[arg(long = "from_date", visible_alias = "from-date", value_name = "YYYY-MM-DD", value_parser = parse_date_arg)]
    pub from_date: Option<Date>,

    /// Exclusive end date of PR creation (YYYY-MM-DD), also -td
    #[arg(long = "to_date", visible_alias = "to-date", value_name = "YYYY-MM-DD", value_parser = parse_date_arg)]
    pub to_date: Option<Date>,

    /// Repository to pull, as OWNER/REPO
    #[arg(short, long, default_value = DEFAULT_REPO)]
    pub repo: String,

    /// INI file with a [github] section holding the token
    #[arg(short, long, env = "PR_DATA_PULL_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds (waits indefinitely when unset)
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the bundled SQL queries, or print one by name
    Queries {
        /// Query to print
        name: Option<String>,
    },
}

impl Cli {
    /// Parse the process arguments, accepting `-fd` and `-td`
    pub fn parse_args() -> Self {
        Cli::parse_from(normalize_args(std::env::args_os()))
    }
}

fn parse_date_arg(s: &str) -> Result<Date, String> {
    crate::time::parse_date(s).map_err(|e| e.to_string())
}

/// Rewrite the two-letter short flags `-fd` and `-td` to their long forms
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    const ALIASES: &[(&str, &str)] = &[("-fd", "--from_date"), ("-td", "--to_date")];

    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            let Some(s) = arg.to_str() else {
                return arg;
            };

            for (short, long) in ALIASES {
                if s == *short {
                    return OsString::from(*long);
                }
                if let Some(value) = s.strip_prefix(short).and_then(|rest| rest.strip_prefix('=')) {
                    return OsString::from(format!("{}={}", long, value));
                }
            }
            arg
        })
        .collect()
}
