pub mod catalog;
pub mod client;
pub mod detail;
pub mod endpoints;
pub mod error;
pub mod json_path;
pub mod pipeline;
mod retry;
pub mod reviews;

pub use client::CatalogClient;
pub use error::FetchError;
pub use pipeline::{run, Harvest, RunOutcome};
