mod client;
mod models;
mod pagination;

pub use client::*;
pub use models::*;
pub use pagination::{next_page_url, Paginated};
