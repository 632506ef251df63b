//! Frost observations: download, flatten and reshape.

pub mod cache;
pub mod error;
pub mod fetcher;
pub mod frame;
pub mod query;
pub mod response;
