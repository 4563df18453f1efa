//! API endpoint modules organized by category.
//!
//! Each module adds typed methods on [`ApiClient`](crate::client::ApiClient)
//! for a group of related upstream endpoints.

pub mod groups;
pub mod keys;
pub mod sensors;
