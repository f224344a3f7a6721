//! Service layer for the crawler application.
//!
//! This module contains the extraction logic for:
//! - Tournament match lists (`ListExtractor`)
//! - Game detail pages (`DetailExtractor`)
//! - Game link discovery (`LinkDiscovery`)

mod detail;
mod links;
mod listing;

pub use detail::DetailExtractor;
pub use links::LinkDiscovery;
pub use listing::{ListExtractor, split_score};
