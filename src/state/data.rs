//! Shared data structures for the application state
//!
//! These types are used by every screen controller and by the views
//! that render them.

use std::sync::atomic::{AtomicU64, Ordering};

/// A screen the user can navigate to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The breed catalog (`/`)
    Catalog,
    /// One breed's image grid (`/page/breed/{name}`)
    Breed(String),
    /// The liked images (`/likes-page`)
    Likes,
}

impl Route {
    /// Path segments of the route on the web origin, used for share links
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Route::Catalog => Vec::new(),
            Route::Breed(breed) => vec!["page", "breed", breed.as_str()],
            Route::Likes => vec!["likes-page"],
        }
    }

    /// Heading shown for the route
    pub fn title(&self) -> String {
        match self {
            Route::Catalog => "Dog Breeds".to_string(),
            Route::Breed(breed) => breed.clone(),
            Route::Likes => "Liked Images".to_string(),
        }
    }
}

/// Tags one request so its response can be matched to the load that
/// issued it.
///
/// Tickets are unique for the whole run. A response that comes back after
/// its controller was replaced carries a ticket the new controller never
/// handed out, and is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Ticket(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Whether a placeholder block reports "nothing here" or a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Empty,
    Error,
}

/// Message block shown in place of a list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    /// Text shown in the block
    pub message: &'static str,
}

impl Notice {
    pub fn empty(message: &'static str) -> Self {
        Notice {
            kind: NoticeKind::Empty,
            message,
        }
    }

    pub fn error(message: &'static str) -> Self {
        Notice {
            kind: NoticeKind::Error,
            message,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// A list fetched from the API, in one of its three render states.
///
/// An empty `Loaded` list and a `Failed` load both resolve to a single
/// notice, so a list never renders zero or several placeholder blocks.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing<T> {
    Loading,
    Loaded(Vec<T>),
    Failed(Notice),
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Listing::Loading
    }
}

impl<T> Listing<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Listing::Loading)
    }

    /// Loaded items, empty while loading or after a failure
    pub fn items(&self) -> &[T] {
        match self {
            Listing::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn items_mut(&mut self) -> Option<&mut Vec<T>> {
        match self {
            Listing::Loaded(items) => Some(items),
            _ => None,
        }
    }

    /// The single placeholder to show instead of items, if any
    pub fn notice(&self, empty_message: &'static str) -> Option<Notice> {
        match self {
            Listing::Loading => None,
            Listing::Loaded(items) if items.is_empty() => Some(Notice::empty(empty_message)),
            Listing::Loaded(_) => None,
            Listing::Failed(notice) => Some(notice.clone()),
        }
    }
}
