use anyhow::{anyhow, Result};
use pr_data_pull::cli::{Cli, Commands};
use pr_data_pull::config::get_github_token;
use pr_data_pull::error::user_friendly_error;
use pr_data_pull::extract_and_format;
use pr_data_pull::github::{ClientOptions, GitHubClient};
use pr_data_pull::query::search_query;
use pr_data_pull::sql;
use std::io::{self, Write};
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse_args();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    let result = match &cli.command {
        Some(Commands::Queries { name }) => queries_command(name.as_deref()),
        None => pull_command(&cli),
    };

    if let Err(e) = result {
        debug!("{:?}", e);
        user_friendly_error(&e).display();
        std::process::exit(1);
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // stdout is reserved for records
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn pull_command(cli: &Cli) -> Result<()> {
    let query = search_query(&cli.repo, cli.from_date, cli.to_date)?;
    info!("GitHub query: '{}'", query);

    info!("Reading GitHub token from {:?}", cli.config);
    let token = get_github_token(&cli.config)?;

    let options = ClientOptions {
        api_url: cli.api_url.clone(),
        timeout: cli.timeout.map(Duration::from_secs),
    };
    let client = GitHubClient::new(&token, &options)?;

    let stdout = io::stdout();
    extract_and_format(&client, &cli.repo, &query, stdout.lock())?;

    Ok(())
}

fn queries_command(name: Option<&str>) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match name {
        Some(name) => {
            let query = sql::find(name).ok_or_else(|| {
                anyhow!("Unknown query '{}'. Run 'pr-data-pull queries' to list them", name)
            })?;
            writeln!(out, "{}", query.sql.trim_end())?;
        }
        None => {
            for query in sql::QUERIES {
                writeln!(out, "{:<32} {}", query.name, query.description)?;
            }
        }
    }

    Ok(())
}
