//! Listing source implementations.

mod serpapi;

pub use serpapi::SerpApiListingSource;
