//! # API Route Modules
//!
//! - `certificates` — issue, list, fetch, and revoke certificates.

pub mod certificates;
