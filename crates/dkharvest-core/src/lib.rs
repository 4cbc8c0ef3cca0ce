//! Shared types for the Digikala catalog harvester: the run configuration
//! and the two flat output records (products and reviews).

mod config;
mod records;

pub use config::RunConfig;
pub use records::{ProductRecord, ReviewRecord};
