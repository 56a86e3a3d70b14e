use std::collections::HashSet;
use std::future::Future;

use super::data::{Notice, Ticket};
use crate::api::{ApiClient, ApiResult, LikeRecord};

/// Images requested per page on the breed screen
pub const PAGE_SIZE: u32 = 10;

pub const EMPTY_MESSAGE: &str = "No images found for this breed.";
pub const ERROR_MESSAGE: &str = "Could not load images.";

/// One image card in the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCard {
    /// Absolute image URL, also the card's identity
    pub url: String,
    /// Last requested like state, not necessarily confirmed by the server
    pub liked: bool,
}

impl ImageCard {
    pub fn like_label(&self) -> &'static str {
        if self.liked {
            "Liked"
        } else {
            "Like"
        }
    }
}

/// State of the "load more" button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMore {
    Loading,
    Ready,
    Exhausted,
    Retry,
}

impl LoadMore {
    pub fn label(self) -> &'static str {
        match self {
            LoadMore::Loading => "Loading...",
            LoadMore::Ready => "Load More Images",
            LoadMore::Exhausted => "No More Images",
            LoadMore::Retry => "Retry Loading",
        }
    }

    pub fn enabled(self) -> bool {
        matches!(self, LoadMore::Ready | LoadMore::Retry)
    }
}

/// Result of one page load: the page's image URLs plus the liked URLs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageLoad {
    /// Image URLs of the page, in server order
    pub images: Vec<String>,
    /// Every liked image URL, across all breeds
    pub liked: HashSet<String>,
}

/// Breed detail controller state.
///
/// Created fresh on every visit to a breed screen.
#[derive(Debug, Clone)]
pub struct BreedGallery {
    /// Breed name, as used in the API path
    pub breed: String,
    /// Last page requested; rolled back when that request fails
    page: u32,
    /// Request in flight, if any
    load: Option<Ticket>,
    /// Set once a short or empty page arrives; never cleared
    exhausted: bool,
    /// Grid replaced by placeholder tiles while page 1 loads
    skeleton: bool,
    /// Cards in page order
    pub cards: Vec<ImageCard>,
    /// Empty or error block shown after the cards
    pub notice: Option<Notice>,
    /// Label and enabled state of the "load more" button
    pub button: LoadMore,
}

impl BreedGallery {
    pub fn new(breed: impl Into<String>) -> Self {
        BreedGallery {
            breed: breed.into(),
            page: 1,
            load: None,
            exhausted: false,
            skeleton: false,
            cards: Vec::new(),
            notice: None,
            button: LoadMore::Loading,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.load.is_some()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// True while the first page is loading and the grid shows placeholders
    pub fn shows_skeleton(&self) -> bool {
        self.skeleton
    }

    /// Start loading from page 1. Returns the ticket and page to request,
    /// or `None` when a load is already in flight.
    pub fn begin_reset(&mut self) -> Option<(Ticket, u32)> {
        if self.load.is_some() {
            return None;
        }
        self.page = 1;
        self.skeleton = true;
        self.cards.clear();
        self.notice = None;
        self.button = LoadMore::Loading;
        Some(self.issue())
    }

    /// Start loading the next page. Ignored while a load is in flight or
    /// after the last page. When nothing has loaded yet (the first page
    /// failed) this starts over from page 1.
    pub fn begin_load_more(&mut self) -> Option<(Ticket, u32)> {
        if self.load.is_some() || self.exhausted {
            return None;
        }
        if self.cards.is_empty() {
            return self.begin_reset();
        }
        self.page += 1;
        self.notice = None;
        self.button = LoadMore::Loading;
        Some(self.issue())
    }

    fn issue(&mut self) -> (Ticket, u32) {
        let ticket = Ticket::next();
        self.load = Some(ticket);
        (ticket, self.page)
    }

    /// Apply the result of the request tagged `ticket`. Returns the URLs of
    /// the cards that were appended. Results for any other request are
    /// dropped.
    pub fn finish(&mut self, ticket: Ticket, result: ApiResult<PageLoad>) -> Vec<String> {
        if self.load != Some(ticket) {
            log::debug!("Dropping stale page for {}", self.breed);
            return Vec::new();
        }
        self.load = None;
        self.skeleton = false;

        match result {
            Ok(load) => {
                if load.images.is_empty() {
                    if self.page == 1 {
                        self.cards.clear();
                        self.notice = Some(Notice::empty(EMPTY_MESSAGE));
                    }
                    self.exhausted = true;
                    self.button = LoadMore::Exhausted;
                    return Vec::new();
                }

                let short = load.images.len() < PAGE_SIZE as usize;
                self.cards.extend(load.images.iter().map(|url| ImageCard {
                    url: url.clone(),
                    liked: load.liked.contains(url),
                }));

                if short {
                    self.exhausted = true;
                    self.button = LoadMore::Exhausted;
                } else {
                    self.button = LoadMore::Ready;
                }
                load.images
            }
            Err(err) => {
                log::error!("Failed to fetch images for {}: {}", self.breed, err);
                if self.page > 1 {
                    // cards already loaded stay; Retry asks for this page again
                    self.page -= 1;
                } else {
                    self.cards.clear();
                }
                self.notice = Some(Notice::error(ERROR_MESSAGE));
                self.button = LoadMore::Retry;
                Vec::new()
            }
        }
    }

    /// Flip a card's like state ahead of the server call. Returns the new
    /// state, or `None` when the card is not on screen.
    pub fn toggle_like(&mut self, url: &str) -> Option<bool> {
        let card = self.cards.iter_mut().find(|card| card.url == url)?;
        card.liked = !card.liked;
        Some(card.liked)
    }
}

/// Fetch one page of a breed's images, then the likes list to mark cards
pub async fn load_page(client: ApiClient, breed: String, page: u32) -> ApiResult<PageLoad> {
    let likes_client = client.clone();
    gather_page(
        || async move { client.breed_images(&breed, page, PAGE_SIZE).await },
        || async move { likes_client.likes().await },
    )
    .await
}

/// Run the image request, then the likes request.
///
/// A failing likes call only loses the liked markers. A failing image call
/// fails the page and skips the likes call.
pub async fn gather_page<I, IFut, L, LFut>(fetch_images: I, fetch_likes: L) -> ApiResult<PageLoad>
where
    I: FnOnce() -> IFut,
    IFut: Future<Output = ApiResult<Vec<String>>>,
    L: FnOnce() -> LFut,
    LFut: Future<Output = ApiResult<Vec<LikeRecord>>>,
{
    let images = fetch_images().await?;

    let liked = match fetch_likes().await {
        Ok(likes) => likes.into_iter().map(|like| like.image_url).collect(),
        Err(err) => {
            log::error!("Likes endpoint failed: {}", err);
            HashSet::new()
        }
    };

    Ok(PageLoad { images, liked })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use std::cell::RefCell;

    fn urls(count: usize, offset: usize) -> Vec<String> {
        (offset..offset + count)
            .map(|i| format!("https://images.dog.ceo/breeds/poodle/{i}.jpg"))
            .collect()
    }

    fn page_of(images: Vec<String>) -> ApiResult<PageLoad> {
        Ok(PageLoad {
            images,
            liked: HashSet::new(),
        })
    }

    fn failure() -> ApiResult<PageLoad> {
        Err(ApiError::RequestFailed {
            url: "/breed/poodle".into(),
            status: 500,
        })
    }

    fn reset(gallery: &mut BreedGallery) -> Ticket {
        gallery.begin_reset().unwrap().0
    }

    fn more(gallery: &mut BreedGallery) -> Ticket {
        gallery.begin_load_more().unwrap().0
    }

    #[test]
    fn test_full_then_short_page() {
        let mut gallery = BreedGallery::new("poodle");

        let (ticket, page) = gallery.begin_reset().unwrap();
        assert_eq!(page, 1);
        assert!(gallery.shows_skeleton());
        gallery.finish(ticket, page_of(urls(10, 0)));
        assert_eq!(gallery.cards.len(), 10);
        assert_eq!(gallery.button, LoadMore::Ready);
        assert!(gallery.button.enabled());

        let (ticket, page) = gallery.begin_load_more().unwrap();
        assert_eq!(page, 2);
        let added = gallery.finish(ticket, page_of(urls(3, 10)));
        assert_eq!(added.len(), 3);
        assert_eq!(gallery.cards.len(), 13);
        assert_eq!(gallery.button.label(), "No More Images");
        assert!(!gallery.button.enabled());
    }

    #[test]
    fn test_no_overlapping_page_requests() {
        let mut gallery = BreedGallery::new("poodle");
        let ticket = reset(&mut gallery);
        gallery.finish(ticket, page_of(urls(10, 0)));

        let ticket = more(&mut gallery);
        assert_eq!(gallery.begin_load_more(), None);
        assert_eq!(gallery.begin_reset(), None);
        assert_eq!(gallery.page(), 2);

        gallery.finish(ticket, page_of(urls(10, 10)));
        assert_eq!(gallery.begin_load_more().map(|(_, page)| page), Some(3));
    }

    #[test]
    fn test_short_page_stops_for_good() {
        let mut gallery = BreedGallery::new("pug");
        let ticket = reset(&mut gallery);
        gallery.finish(ticket, page_of(urls(4, 0)));

        assert!(gallery.is_exhausted());
        for _ in 0..3 {
            assert_eq!(gallery.begin_load_more(), None);
        }
        assert_eq!(gallery.button, LoadMore::Exhausted);
    }

    #[test]
    fn test_empty_first_page_shows_one_notice() {
        let mut gallery = BreedGallery::new("pug");
        let ticket = reset(&mut gallery);
        gallery.finish(ticket, page_of(Vec::new()));

        assert!(gallery.cards.is_empty());
        assert_eq!(gallery.notice, Some(Notice::empty(EMPTY_MESSAGE)));
        assert_eq!(gallery.button, LoadMore::Exhausted);
    }

    #[test]
    fn test_empty_later_page_keeps_cards_without_notice() {
        let mut gallery = BreedGallery::new("pug");
        let ticket = reset(&mut gallery);
        gallery.finish(ticket, page_of(urls(10, 0)));
        let ticket = more(&mut gallery);
        gallery.finish(ticket, page_of(Vec::new()));

        assert_eq!(gallery.cards.len(), 10);
        assert!(gallery.notice.is_none());
        assert!(gallery.is_exhausted());
    }

    #[test]
    fn test_failure_rolls_page_back() {
        let mut gallery = BreedGallery::new("poodle");
        let ticket = reset(&mut gallery);
        gallery.finish(ticket, page_of(urls(10, 0)));
        let ticket = more(&mut gallery);
        gallery.finish(ticket, failure());

        assert_eq!(gallery.page(), 1);
        assert_eq!(gallery.cards.len(), 10);
        assert!(gallery.notice.as_ref().unwrap().is_error());
        assert_eq!(gallery.button.label(), "Retry Loading");

        // retrying asks for page 2 again
        assert_eq!(gallery.begin_load_more().map(|(_, page)| page), Some(2));
        assert!(gallery.notice.is_none());
    }

    #[test]
    fn test_first_page_failure_retries_from_start() {
        let mut gallery = BreedGallery::new("poodle");
        let ticket = reset(&mut gallery);
        gallery.finish(ticket, failure());

        assert_eq!(gallery.page(), 1);
        assert!(gallery.cards.is_empty());
        assert_eq!(gallery.begin_load_more().map(|(_, page)| page), Some(1));
        assert!(gallery.shows_skeleton());
    }

    #[test]
    fn test_result_from_replaced_gallery_is_dropped() {
        let mut old = BreedGallery::new("poodle");
        let old_ticket = reset(&mut old);

        // same breed visited again: same page, different request
        let mut gallery = BreedGallery::new("poodle");
        let ticket = reset(&mut gallery);
        assert!(gallery.finish(old_ticket, page_of(urls(10, 0))).is_empty());
        assert!(gallery.is_loading());
        assert!(gallery.cards.is_empty());

        assert_eq!(gallery.finish(ticket, page_of(urls(2, 0))).len(), 2);
        assert!(!gallery.is_loading());
    }

    #[test]
    fn test_cards_marked_from_likes() {
        let mut gallery = BreedGallery::new("poodle");
        let images = urls(10, 0);
        let liked: HashSet<String> = [images[2].clone()].into_iter().collect();

        let ticket = reset(&mut gallery);
        gallery.finish(ticket, Ok(PageLoad { images, liked }));

        let liked_cards: Vec<usize> = gallery
            .cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.liked)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(liked_cards, vec![2]);
        assert_eq!(gallery.cards[2].like_label(), "Liked");
    }

    #[test]
    fn test_double_toggle_returns_to_unliked() {
        let mut gallery = BreedGallery::new("poodle");
        let ticket = reset(&mut gallery);
        gallery.finish(ticket, page_of(urls(10, 0)));
        let url = gallery.cards[0].url.clone();

        assert_eq!(gallery.toggle_like(&url), Some(true));
        assert_eq!(gallery.cards[0].like_label(), "Liked");
        assert_eq!(gallery.toggle_like(&url), Some(false));
        assert_eq!(gallery.cards[0].like_label(), "Like");
        assert_eq!(gallery.toggle_like("https://elsewhere/x.jpg"), None);
    }

    #[tokio::test]
    async fn test_likes_fetched_after_images() {
        let calls = RefCell::new(Vec::new());
        let images = urls(2, 0);
        let liked = vec![LikeRecord {
            image_url: images[1].clone(),
            breed: "poodle".into(),
        }];

        let load = gather_page(
            || {
                calls.borrow_mut().push("images");
                let images = images.clone();
                async move { Ok(images) }
            },
            || {
                calls.borrow_mut().push("likes");
                async move { Ok(liked) }
            },
        )
        .await
        .unwrap();

        assert_eq!(*calls.borrow(), vec!["images", "likes"]);
        assert_eq!(load.images, images);
        assert!(load.liked.contains(&images[1]));
        assert!(!load.liked.contains(&images[0]));
    }

    #[tokio::test]
    async fn test_likes_failure_means_no_likes() {
        let load = gather_page(
            || async move { Ok(urls(3, 0)) },
            || async move {
                Err(ApiError::RequestFailed {
                    url: "/likes".into(),
                    status: 500,
                })
            },
        )
        .await
        .unwrap();

        assert_eq!(load.images.len(), 3);
        assert!(load.liked.is_empty());
    }

    #[tokio::test]
    async fn test_image_failure_skips_likes() {
        let calls = RefCell::new(Vec::new());

        let result = gather_page(
            || {
                calls.borrow_mut().push("images");
                async move {
                    Err(ApiError::Transport {
                        url: "/breed/poodle".into(),
                        reason: "connection refused".into(),
                    })
                }
            },
            || {
                calls.borrow_mut().push("likes");
                async move { Ok(Vec::new()) }
            },
        )
        .await;

        assert!(result.is_err());
        assert_eq!(*calls.borrow(), vec!["images"]);
    }
}
