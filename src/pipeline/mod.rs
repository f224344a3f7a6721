//! Pipeline entry points for crawler operations.
//!
//! - `run_listing`: Discover matches from a tournament match list
//! - `run_details`: Fetch game statistics for a persisted match list
//! - `run_pipeline`: Both stages back to back
//! - `run_links`: Collect game links from any page
//! - `run_validate`: Check configuration

pub mod crawl;
pub mod links;
pub mod pipeline;
pub mod validate;

pub use crawl::{crawl_details, crawl_listing, run_details, run_listing};
pub use links::run_links;
pub use pipeline::run_pipeline;
pub use validate::run_validate;
