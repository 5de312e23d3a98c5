pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod github;
pub mod query;
pub mod records;
pub mod sql;
pub mod time;

#[cfg(test)]
mod test_utils;

pub use config::Credentials;
pub use extract::{extract_and_format, ExtractStats, Extractor};
pub use records::Record;
