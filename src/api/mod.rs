/// Gallery API access
///
/// This module handles:
/// - The fetch-and-decode helper and its error type (client.rs)
/// - Wire records for requests and responses (models.rs)

pub mod client;
pub mod models;

pub use client::{ApiClient, ApiError, ApiResult};
pub use models::{LikeRecord, MostLiked};
