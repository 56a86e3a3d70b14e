use std::fmt;
use std::future::Future;

use super::data::{Listing, Notice, Ticket};
use crate::api::{ApiClient, ApiResult, MostLiked};

pub const EMPTY_MESSAGE: &str = "No breeds found for the current filter/search.";
pub const ERROR_MESSAGE: &str = "Could not load breed list.";
pub const RECENT_EMPTY_MESSAGE: &str = "No recently viewed breeds yet.";
pub const RECENT_ERROR_MESSAGE: &str = "Could not load recently viewed breeds.";
pub const PREVIEW_EMPTY_MESSAGE: &str = "No preview images available.";
pub const PREVIEW_ERROR_MESSAGE: &str = "Could not load breed preview.";

/// Chips shown in the recent strip
pub const RECENT_LIMIT: usize = 5;
/// Images shown in the preview modal
pub const PREVIEW_COUNT: u32 = 4;

/// Which endpoint supplies the base breed list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Liked,
    Viewed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Liked, Filter::Viewed];
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Filter::All => "All breeds",
            Filter::Liked => "Liked breeds",
            Filter::Viewed => "Viewed breeds",
        })
    }
}

/// Ordering of the breed list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sort {
    #[default]
    AtoZ,
    ZtoA,
    /// Replaces the list with the server's most-liked ranking
    MostLiked,
}

impl Sort {
    pub const ALL: [Sort; 3] = [Sort::AtoZ, Sort::ZtoA, Sort::MostLiked];
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sort::AtoZ => "A-Z",
            Sort::ZtoA => "Z-A",
            Sort::MostLiked => "Most liked",
        })
    }
}

/// Order a breed list in place. `MostLiked` keeps the server ranking.
pub fn apply_sort(breeds: &mut [String], sort: Sort) {
    match sort {
        Sort::AtoZ => breeds.sort(),
        Sort::ZtoA => {
            breeds.sort();
            breeds.reverse();
        }
        Sort::MostLiked => {}
    }
}

/// Case-insensitive substring search over breed names
pub fn search<'a>(breeds: &'a [String], query: &str) -> Vec<&'a str> {
    let needle = query.trim().to_lowercase();
    breeds
        .iter()
        .filter(|breed| breed.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}

/// The preview modal for one breed
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    /// Breed the modal was opened for
    pub breed: String,
    /// First few images of the breed
    pub images: Listing<String>,
    /// Request that fills `images`
    ticket: Ticket,
}

/// A breed list request to issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreedsRequest {
    pub ticket: Ticket,
    pub filter: Filter,
    pub sort: Sort,
}

/// Catalog controller state
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Base list the breeds come from
    pub filter: Filter,
    /// Order of the breed grid
    pub sort: Sort,
    /// Search box text; narrows the loaded list without a request
    pub query: String,
    /// The loaded breed list, already sorted
    pub breeds: Listing<String>,
    /// Breed list request in flight
    breeds_load: Option<Ticket>,
    /// Filter or sort changed while a load was in flight
    reload_queued: bool,
    /// Breeds for the "recently viewed" chips
    pub recent: Listing<String>,
    /// Recent strip request in flight
    recent_load: Option<Ticket>,
    /// The preview modal, while open
    pub preview: Option<Preview>,
    /// Loads the current "refresh gallery" press is waiting on
    refresh: Vec<Ticket>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.pending_breeds().is_some()
    }

    /// Ticket of the breed list request in flight
    pub fn pending_breeds(&self) -> Option<Ticket> {
        self.breeds_load
    }

    /// Start loading the breed list with the current filter and sort.
    /// Returns `None` while a load is in flight; the change is then picked up
    /// when that load finishes.
    pub fn begin_load(&mut self) -> Option<BreedsRequest> {
        if self.breeds_load.is_some() {
            self.reload_queued = true;
            return None;
        }
        let ticket = Ticket::next();
        self.breeds_load = Some(ticket);
        self.reload_queued = false;
        self.breeds = Listing::Loading;
        Some(BreedsRequest {
            ticket,
            filter: self.filter,
            sort: self.sort,
        })
    }

    /// Apply a finished breed list load. Returns true when another load
    /// should start because the filter or sort changed meanwhile. Results
    /// for a request this catalog is not waiting on are dropped.
    pub fn finish_load(&mut self, ticket: Ticket, result: ApiResult<Vec<String>>) -> bool {
        if self.breeds_load != Some(ticket) {
            log::debug!("Dropping stale breed list {:?}", ticket);
            return false;
        }
        self.breeds_load = None;
        self.breeds = match result {
            Ok(breeds) => Listing::Loaded(breeds),
            Err(err) => {
                log::error!("Failed to load breeds: {}", err);
                Listing::Failed(Notice::error(ERROR_MESSAGE))
            }
        };
        std::mem::take(&mut self.reload_queued)
    }

    /// Breeds matching the search box, in list order
    pub fn visible(&self) -> Vec<&str> {
        search(self.breeds.items(), &self.query)
    }

    /// Placeholder for the breed grid, if any
    pub fn notice(&self) -> Option<Notice> {
        match &self.breeds {
            Listing::Loading => None,
            Listing::Failed(notice) => Some(notice.clone()),
            Listing::Loaded(_) if self.visible().is_empty() => Some(Notice::empty(EMPTY_MESSAGE)),
            Listing::Loaded(_) => None,
        }
    }

    /// Start loading the recent strip, unless it is already loading
    pub fn begin_recent(&mut self) -> Option<Ticket> {
        if self.recent_load.is_some() {
            return None;
        }
        let ticket = Ticket::next();
        self.recent_load = Some(ticket);
        self.recent = Listing::Loading;
        Some(ticket)
    }

    pub fn finish_recent(&mut self, ticket: Ticket, result: ApiResult<Vec<String>>) {
        if self.recent_load != Some(ticket) {
            log::debug!("Dropping stale recent strip {:?}", ticket);
            return;
        }
        self.recent_load = None;
        self.recent = match result {
            Ok(mut breeds) => {
                breeds.truncate(RECENT_LIMIT);
                Listing::Loaded(breeds)
            }
            Err(err) => {
                log::error!("Failed to load recent breeds: {}", err);
                Listing::Failed(Notice::error(RECENT_ERROR_MESSAGE))
            }
        };
    }

    pub fn recent_notice(&self) -> Option<Notice> {
        self.recent.notice(RECENT_EMPTY_MESSAGE)
    }

    /// Start a "refresh gallery". Returns the breed list and recent strip
    /// requests to issue. A load already in flight is waited on instead of
    /// being issued again.
    pub fn begin_refresh(&mut self) -> (Option<BreedsRequest>, Option<Ticket>) {
        let breeds = match self.breeds_load {
            Some(_) => None,
            None => self.begin_load(),
        };
        let recent = self.begin_recent();
        self.refresh = self.breeds_load.into_iter().chain(self.recent_load).collect();
        (breeds, recent)
    }

    /// A queued reload replaced the breed load a refresh was waiting on
    pub fn follow_refresh(&mut self, finished: Ticket, next: Ticket) {
        for pending in self.refresh.iter_mut().filter(|pending| **pending == finished) {
            *pending = next;
        }
    }

    /// Count the load tagged `ticket` against a pending refresh. Returns true
    /// when the refresh just completed.
    pub fn settle_refresh(&mut self, ticket: Ticket) -> bool {
        let waiting = self.refresh.len();
        self.refresh.retain(|pending| *pending != ticket);
        self.refresh.len() < waiting && self.refresh.is_empty()
    }

    /// Open (or switch) the preview modal. Returns the ticket for its
    /// image request.
    pub fn open_preview(&mut self, breed: &str) -> Ticket {
        let ticket = Ticket::next();
        self.preview = Some(Preview {
            breed: breed.to_string(),
            images: Listing::Loading,
            ticket,
        });
        ticket
    }

    /// Apply preview images. Results for a preview that is no longer shown
    /// are dropped. Returns the image URLs now on screen.
    pub fn finish_preview(&mut self, ticket: Ticket, result: ApiResult<Vec<String>>) -> Vec<String> {
        let Some(preview) = self.preview.as_mut().filter(|preview| preview.ticket == ticket) else {
            log::debug!("Dropping stale preview {:?}", ticket);
            return Vec::new();
        };

        match result {
            Ok(images) => {
                preview.images = Listing::Loaded(images.clone());
                images
            }
            Err(err) => {
                log::error!("Modal preview failed for {}: {}", preview.breed, err);
                preview.images = Listing::Failed(Notice::error(PREVIEW_ERROR_MESSAGE));
                Vec::new()
            }
        }
    }

    pub fn close_preview(&mut self) {
        self.preview = None;
    }

    pub fn active_breed(&self) -> Option<&str> {
        self.preview.as_ref().map(|preview| preview.breed.as_str())
    }
}

/// Server list a breed list is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreedSource {
    /// `GET /breeds`, walked page by page
    All,
    /// `GET /breeds/liked`
    Liked,
    /// `GET /breeds/viewed`
    Viewed,
    /// `GET /breeds/most-liked`, reduced to the breed names
    MostLiked,
}

impl From<Filter> for BreedSource {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::All => BreedSource::All,
            Filter::Liked => BreedSource::Liked,
            Filter::Viewed => BreedSource::Viewed,
        }
    }
}

/// Fetch the breed list for `filter` and `sort` from the API
pub async fn load_breed_list(client: ApiClient, filter: Filter, sort: Sort) -> ApiResult<Vec<String>> {
    build_breed_list(filter, sort, |source| {
        let client = client.clone();
        async move {
            match source {
                BreedSource::All => client.all_breeds().await,
                BreedSource::Liked => client.liked_breeds().await,
                BreedSource::Viewed => client.viewed_breeds().await,
                BreedSource::MostLiked => {
                    let ranking: Vec<MostLiked> = client.most_liked().await?;
                    Ok(ranking.into_iter().map(|entry| entry.breed).collect())
                }
            }
        }
    })
    .await
}

/// Fetch the base list for `filter`, then apply `sort`.
///
/// The most-liked ranking is requested after the base list, never
/// alongside it, and replaces it.
pub async fn build_breed_list<F, Fut>(filter: Filter, sort: Sort, mut fetch: F) -> ApiResult<Vec<String>>
where
    F: FnMut(BreedSource) -> Fut,
    Fut: Future<Output = ApiResult<Vec<String>>>,
{
    let mut breeds = fetch(filter.into()).await?;

    if sort == Sort::MostLiked {
        breeds = fetch(BreedSource::MostLiked).await?;
    }

    apply_sort(&mut breeds, sort);
    Ok(breeds)
}

/// Fetch the first few images of a breed for the preview modal
pub async fn load_preview(client: ApiClient, breed: String) -> ApiResult<Vec<String>> {
    client.breed_images(&breed, 1, PREVIEW_COUNT).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use std::cell::RefCell;

    fn owned(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn loaded(names: &[&str]) -> Catalog {
        let mut catalog = Catalog::new();
        let request = catalog.begin_load().unwrap();
        catalog.finish_load(request.ticket, Ok(owned(names)));
        catalog
    }

    #[test]
    fn test_search_ignores_case() {
        let breeds = owned(&["Labrador", "labrador retriever", "poodle"]);
        assert_eq!(search(&breeds, "lab"), vec!["Labrador", "labrador retriever"]);
        assert_eq!(search(&breeds, "LAB"), vec!["Labrador", "labrador retriever"]);
        assert_eq!(search(&breeds, ""), vec!["Labrador", "labrador retriever", "poodle"]);
    }

    #[test]
    fn test_sort_orders() {
        let mut breeds = owned(&["pug", "akita", "boxer"]);
        apply_sort(&mut breeds, Sort::AtoZ);
        assert_eq!(breeds, owned(&["akita", "boxer", "pug"]));
        apply_sort(&mut breeds, Sort::ZtoA);
        assert_eq!(breeds, owned(&["pug", "boxer", "akita"]));

        let mut ranked = owned(&["pug", "akita"]);
        apply_sort(&mut ranked, Sort::MostLiked);
        assert_eq!(ranked, owned(&["pug", "akita"]));
    }

    #[test]
    fn test_search_does_not_touch_loaded_list() {
        let mut catalog = loaded(&["akita", "pug"]);
        catalog.query = "zzz".into();
        assert!(catalog.visible().is_empty());
        assert_eq!(catalog.notice(), Some(Notice::empty(EMPTY_MESSAGE)));

        catalog.query.clear();
        assert_eq!(catalog.visible(), vec!["akita", "pug"]);
        assert!(catalog.notice().is_none());
    }

    #[test]
    fn test_filter_change_during_load_is_queued() {
        let mut catalog = Catalog::new();
        let first = catalog.begin_load().unwrap();
        assert_eq!((first.filter, first.sort), (Filter::All, Sort::AtoZ));

        catalog.filter = Filter::Liked;
        assert_eq!(catalog.begin_load(), None);

        assert!(catalog.finish_load(first.ticket, Ok(owned(&["akita"]))));
        let second = catalog.begin_load().unwrap();
        assert_eq!((second.filter, second.sort), (Filter::Liked, Sort::AtoZ));
        assert!(!catalog.finish_load(second.ticket, Ok(Vec::new())));
    }

    #[test]
    fn test_breed_list_from_other_request_is_dropped() {
        let mut old = Catalog::new();
        let stale = old.begin_load().unwrap();

        let mut catalog = Catalog::new();
        let current = catalog.begin_load().unwrap();
        assert!(!catalog.finish_load(stale.ticket, Ok(owned(&["liked-only"]))));
        assert!(catalog.is_loading());
        assert!(catalog.breeds.is_loading());

        catalog.finish_load(current.ticket, Ok(owned(&["akita", "pug"])));
        assert!(!catalog.is_loading());
        assert_eq!(catalog.visible(), vec!["akita", "pug"]);
    }

    #[test]
    fn test_failed_load_gives_error_notice() {
        let mut catalog = Catalog::new();
        let request = catalog.begin_load().unwrap();
        catalog.finish_load(
            request.ticket,
            Err(ApiError::RequestFailed {
                url: "/breeds".into(),
                status: 503,
            }),
        );
        let notice = catalog.notice().unwrap();
        assert!(notice.is_error());
        assert_eq!(notice.message, ERROR_MESSAGE);
    }

    #[test]
    fn test_recent_strip_truncates() {
        let mut catalog = Catalog::new();
        let ticket = catalog.begin_recent().unwrap();
        assert_eq!(catalog.begin_recent(), None);
        catalog.finish_recent(ticket, Ok(owned(&["a", "b", "c", "d", "e", "f", "g"])));
        assert_eq!(catalog.recent.items().len(), RECENT_LIMIT);
        assert!(catalog.recent_notice().is_none());
    }

    #[test]
    fn test_stale_recent_strip_is_dropped() {
        let mut catalog = Catalog::new();
        let ticket = catalog.begin_recent().unwrap();
        catalog.finish_recent(Ticket::next(), Ok(owned(&["old"])));
        assert!(catalog.recent.is_loading());
        assert_eq!(catalog.begin_recent(), None);

        catalog.finish_recent(ticket, Ok(owned(&["pug"])));
        assert_eq!(catalog.recent.items(), &["pug".to_string()]);
    }

    #[test]
    fn test_refresh_completes_after_both_loads() {
        let mut catalog = Catalog::new();
        let (breeds, recent) = catalog.begin_refresh();
        let breeds = breeds.unwrap();
        let recent = recent.unwrap();

        catalog.finish_load(breeds.ticket, Ok(owned(&["akita"])));
        assert!(!catalog.settle_refresh(breeds.ticket));
        catalog.finish_recent(recent, Ok(Vec::new()));
        assert!(catalog.settle_refresh(recent));
        assert!(!catalog.settle_refresh(recent));
    }

    #[test]
    fn test_refresh_waits_for_loads_in_flight() {
        let mut catalog = Catalog::new();
        let breeds = catalog.begin_load().unwrap();
        let retry = catalog.begin_recent().unwrap();

        let (started, recent) = catalog.begin_refresh();
        assert!(started.is_none());
        assert!(recent.is_none());

        // the recent strip landing first must not complete the refresh
        catalog.finish_recent(retry, Ok(Vec::new()));
        assert!(!catalog.settle_refresh(retry));
        catalog.finish_load(breeds.ticket, Ok(owned(&["akita"])));
        assert!(catalog.settle_refresh(breeds.ticket));
    }

    #[test]
    fn test_refresh_follows_queued_reload() {
        let mut catalog = Catalog::new();
        let (breeds, recent) = catalog.begin_refresh();
        let (breeds, recent) = (breeds.unwrap(), recent.unwrap());
        catalog.finish_recent(recent, Ok(Vec::new()));
        assert!(!catalog.settle_refresh(recent));

        catalog.sort = Sort::ZtoA;
        assert_eq!(catalog.begin_load(), None);
        assert!(catalog.finish_load(breeds.ticket, Ok(owned(&["akita"]))));
        let reload = catalog.begin_load().unwrap();
        catalog.follow_refresh(breeds.ticket, reload.ticket);
        assert!(!catalog.settle_refresh(breeds.ticket));

        catalog.finish_load(reload.ticket, Ok(owned(&["akita"])));
        assert!(catalog.settle_refresh(reload.ticket));
    }

    #[test]
    fn test_stale_preview_is_dropped() {
        let mut catalog = Catalog::new();
        let akita = catalog.open_preview("akita");
        let pug = catalog.open_preview("pug");

        let shown = catalog.finish_preview(akita, Ok(owned(&["a.jpg"])));
        assert!(shown.is_empty());
        assert!(catalog.preview.as_ref().unwrap().images.is_loading());

        let shown = catalog.finish_preview(pug, Ok(owned(&["p.jpg"])));
        assert_eq!(shown, owned(&["p.jpg"]));
        assert_eq!(catalog.active_breed(), Some("pug"));
    }

    #[test]
    fn test_reopened_preview_ignores_earlier_request() {
        let mut catalog = Catalog::new();
        let first = catalog.open_preview("akita");
        catalog.close_preview();
        let second = catalog.open_preview("akita");

        assert!(catalog.finish_preview(first, Ok(owned(&["old.jpg"]))).is_empty());
        assert_eq!(catalog.finish_preview(second, Ok(owned(&["new.jpg"]))), owned(&["new.jpg"]));
    }

    #[test]
    fn test_empty_preview_notice() {
        let mut catalog = Catalog::new();
        let ticket = catalog.open_preview("pug");
        catalog.finish_preview(ticket, Ok(Vec::new()));
        let preview = catalog.preview.as_ref().unwrap();
        assert_eq!(
            preview.images.notice(PREVIEW_EMPTY_MESSAGE),
            Some(Notice::empty(PREVIEW_EMPTY_MESSAGE))
        );

        catalog.close_preview();
        assert!(catalog.active_breed().is_none());
    }

    #[tokio::test]
    async fn test_filter_picks_base_list() {
        for (filter, source) in [
            (Filter::All, BreedSource::All),
            (Filter::Liked, BreedSource::Liked),
            (Filter::Viewed, BreedSource::Viewed),
        ] {
            let calls = RefCell::new(Vec::new());
            let breeds = build_breed_list(filter, Sort::ZtoA, |source| {
                calls.borrow_mut().push(source);
                async move { Ok(vec!["akita".to_string(), "pug".to_string()]) }
            })
            .await
            .unwrap();

            assert_eq!(*calls.borrow(), vec![source]);
            assert_eq!(breeds, owned(&["pug", "akita"]));
        }
    }

    #[tokio::test]
    async fn test_most_liked_replaces_list_after_base() {
        let calls = RefCell::new(Vec::new());
        let breeds = build_breed_list(Filter::Liked, Sort::MostLiked, |source| {
            calls.borrow_mut().push(source);
            let names = match source {
                BreedSource::MostLiked => owned(&["pug", "akita", "boxer"]),
                _ => owned(&["akita", "pug"]),
            };
            async move { Ok(names) }
        })
        .await
        .unwrap();

        assert_eq!(*calls.borrow(), vec![BreedSource::Liked, BreedSource::MostLiked]);
        assert_eq!(breeds, owned(&["pug", "akita", "boxer"]));
    }

    #[tokio::test]
    async fn test_base_failure_skips_ranking() {
        let calls = RefCell::new(Vec::new());
        let result = build_breed_list(Filter::All, Sort::MostLiked, |source| {
            calls.borrow_mut().push(source);
            async move {
                Err(ApiError::RequestFailed {
                    url: "/breeds".into(),
                    status: 500,
                })
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(*calls.borrow(), vec![BreedSource::All]);
    }
}
