//! Utility functions and helpers.

pub mod dom;
pub mod http;
pub mod url;

pub use dom::{element_text, enclosing, icon_alts, next_sibling_matching};
pub use http::{HttpFetcher, PageFetcher, Throttle};
