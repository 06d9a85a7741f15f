#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation and search over ingested datasets.
//!
//! Both operations are pure functions of the dataset snapshot they are
//! handed — no caching, no shared state — so they can run concurrently
//! with each other and are safe to recompute on every request.

pub mod aggregate;
pub mod search;

pub use aggregate::summarize;
pub use search::{search, search_dataset};
