//! Wire records for the gallery API.
//!
//! List fields default to empty so that a response missing them decodes
//! the same way as an empty page.

use serde::{Deserialize, Serialize};

/// One page of `GET /breeds`
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct BreedPage {
    #[serde(default)]
    pub breeds: Vec<String>,
    /// Total breeds on the server; absent on older servers
    #[serde(default)]
    pub total: Option<usize>,
}

/// One page of `GET /breed/{name}`
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ImagePage {
    #[serde(default)]
    pub images: Vec<String>,
}

/// A saved (breed, image) pair from `GET /likes`
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LikeRecord {
    pub image_url: String,
    pub breed: String,
}

/// Body of `POST /like`
#[derive(Serialize, Debug, Clone)]
pub struct LikePayload<'a> {
    pub image_url: &'a str,
    pub breed: &'a str,
}

/// Body of `POST /viewed`
#[derive(Serialize, Debug, Clone)]
pub struct ViewedPayload<'a> {
    pub breed: &'a str,
}

/// An entry of `GET /breeds/most-liked`, ordered by `likes` descending
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct MostLiked {
    pub breed: String,
    #[serde(default)]
    pub likes: u64,
}

/// `{message}` acknowledgement returned by mutating calls
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
}
