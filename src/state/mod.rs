/// State management module
///
/// This module handles all screen state, including:
/// - Shared data structures: routes, notices, listings (data.rs)
/// - The breed catalog with search, filter, sort and preview (catalog.rs)
/// - The paginated breed image grid (breed.rs)
/// - The liked images board (likes.rs)
/// - Downloaded image handles (images.rs)

pub mod breed;
pub mod catalog;
pub mod data;
pub mod images;
pub mod likes;
