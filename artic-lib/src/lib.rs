//! Art Institute of Chicago artworks API client and table core
//!
//! A Rust async client for the public artworks API (`api.artic.edu`) plus a
//! paged, selectable table state machine: one page of records in memory at a
//! time, a selection that survives page navigation, and a bulk
//! "select the first N records" walk across pages.

pub mod error;
pub mod model;
pub mod source;
pub mod table;

mod client;

pub use client::*;
