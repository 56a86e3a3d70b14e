use std::time::Instant;

use crate::api::{ApiResult, LikeRecord};
use crate::state::breed::PageLoad;
use crate::state::catalog::{Filter, Sort};
use crate::state::data::{Route, Ticket};

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    // ========== Shared ==========
    /// Switch screen; builds a fresh controller for the route
    Navigate(Route),
    /// An image download finished
    ImageLoaded {
        url: String,
        result: ApiResult<Vec<u8>>,
    },
    /// Toast clock
    Tick(Instant),
    EscapePressed,
    ZoomOpened {
        url: String,
        alt: String,
    },
    ZoomClosed,
    /// Copy a share link to a breed screen, optionally pointing at one image
    ShareLink {
        breed: String,
        image: Option<String>,
        toast: &'static str,
    },
    /// Copy plain text (an image URL) to the clipboard
    CopyText {
        text: String,
        toast: &'static str,
    },

    // ========== Catalog ==========
    /// Every load result carries the ticket of the request that produced it
    BreedsLoaded {
        ticket: Ticket,
        result: ApiResult<Vec<String>>,
    },
    RecentLoaded {
        ticket: Ticket,
        result: ApiResult<Vec<String>>,
    },
    SearchChanged(String),
    FilterChanged(Filter),
    SortChanged(Sort),
    RetryBreeds,
    RetryRecent,
    /// Reload the breed list and the recent strip together
    RefreshGallery,
    ScrollTop,
    ScrollBottom,
    PreviewOpened(String),
    PreviewLoaded {
        ticket: Ticket,
        result: ApiResult<Vec<String>>,
    },
    PreviewRetry,
    PreviewClosed,

    // ========== Breed detail ==========
    ViewTracked(ApiResult<()>),
    ImagesLoaded {
        ticket: Ticket,
        result: ApiResult<PageLoad>,
    },
    /// "Load more" button and the Retry block after a failed page
    LoadMore,
    LikeToggled(String),
    LikeSettled {
        url: String,
        liked: bool,
        result: ApiResult<()>,
    },

    // ========== Likes ==========
    LikesLoaded {
        ticket: Ticket,
        result: ApiResult<Vec<LikeRecord>>,
    },
    RetryLikes,
    RemoveLike(String),
    LikeRemoved {
        url: String,
        result: ApiResult<()>,
    },
}
