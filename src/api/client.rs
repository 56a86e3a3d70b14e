use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::future::Future;

use super::models::{Ack, BreedPage, ImagePage, LikePayload, LikeRecord, MostLiked, ViewedPayload};

/// Page size used when walking the full breed list
pub const BREED_LIST_PAGE_SIZE: u32 = 100;

/// Every way a gallery request can fail.
///
/// Kept `Clone` so results can travel inside UI messages.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status
    #[error("{url} failed with {status}")]
    RequestFailed { url: String, status: u16 },

    /// The request never got an answer (connection refused, DNS, ...)
    #[error("{url} could not be reached: {reason}")]
    Transport { url: String, reason: String },

    /// The body was not the JSON we expected
    #[error("{url} returned an unreadable body: {reason}")]
    Decode { url: String, reason: String },

    #[error("'{0}' is not a usable http(s) base URL")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status for `RequestFailed`, `None` for the generic rejections
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Thin async client for the gallery API.
///
/// Cloning is cheap: `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    /// Create a client rooted at `base` (e.g. `http://127.0.0.1:8000/`)
    pub fn new(base: Url) -> ApiResult<Self> {
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(base.to_string()));
        }

        let http = Client::builder()
            .user_agent(concat!("dog-gallery/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Ok(ApiClient { http, base })
    }

    /// Parse and validate a base URL string
    pub fn from_str_url(base: &str) -> ApiResult<Self> {
        let url = Url::parse(base.trim()).map_err(|_| ApiError::InvalidUrl(base.to_string()))?;
        Self::new(url)
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Base URL extended with percent-encoded path segments
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        // new() rejects cannot-be-a-base URLs, so this always succeeds
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Shareable link to an in-app route on the API origin, optionally
    /// pointing at one image
    pub fn link(&self, segments: &[&str], image: Option<&str>) -> String {
        let mut url = self.endpoint(segments);
        if let Some(image) = image {
            url.query_pairs_mut().append_pair("img", image);
        }
        url.to_string()
    }

    fn paged(&self, segments: &[&str], page: u32, limit: u32) -> Url {
        let mut url = self.endpoint(segments);
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());
        url
    }

    /// Send a request, fail on non-2xx, decode the body as JSON
    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder, url: &Url) -> ApiResult<T> {
        log::debug!("-> {}", url);

        let response = request.send().await.map_err(|err| ApiError::Transport {
            url: url.to_string(),
            reason: err.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::RequestFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|err| ApiError::Decode {
            url: url.to_string(),
            reason: err.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        self.fetch_json(self.http.get(url.clone()), &url).await
    }

    /// `GET /breed/{name}?page&limit`
    pub async fn breed_images(&self, breed: &str, page: u32, limit: u32) -> ApiResult<Vec<String>> {
        let url = self.paged(&["breed", breed], page, limit);
        let page: ImagePage = self.get_json(url).await?;
        Ok(page.images)
    }

    /// `GET /breeds?page&limit`
    pub async fn breeds_page(&self, page: u32, limit: u32) -> ApiResult<BreedPage> {
        self.get_json(self.paged(&["breeds"], page, limit)).await
    }

    /// Every breed, walking `/breeds` one page at a time
    pub async fn all_breeds(&self) -> ApiResult<Vec<String>> {
        collect_breed_pages(BREED_LIST_PAGE_SIZE, |page| {
            self.breeds_page(page, BREED_LIST_PAGE_SIZE)
        })
        .await
    }

    /// `GET /breeds/liked`
    pub async fn liked_breeds(&self) -> ApiResult<Vec<String>> {
        self.get_json(self.endpoint(&["breeds", "liked"])).await
    }

    /// `GET /breeds/viewed`
    pub async fn viewed_breeds(&self) -> ApiResult<Vec<String>> {
        self.get_json(self.endpoint(&["breeds", "viewed"])).await
    }

    /// `GET /breeds/most-liked`
    pub async fn most_liked(&self) -> ApiResult<Vec<MostLiked>> {
        self.get_json(self.endpoint(&["breeds", "most-liked"])).await
    }

    /// `GET /likes`
    pub async fn likes(&self) -> ApiResult<Vec<LikeRecord>> {
        self.get_json(self.endpoint(&["likes"])).await
    }

    /// `POST /like`
    pub async fn like(&self, image_url: &str, breed: &str) -> ApiResult<()> {
        let url = self.endpoint(&["like"]);
        let request = self.http.post(url.clone()).json(&LikePayload { image_url, breed });
        let _: Ack = self.fetch_json(request, &url).await?;
        Ok(())
    }

    /// `DELETE /like?image_url=`
    pub async fn unlike(&self, image_url: &str) -> ApiResult<()> {
        let mut url = self.endpoint(&["like"]);
        url.query_pairs_mut().append_pair("image_url", image_url);
        let _: Ack = self.fetch_json(self.http.delete(url.clone()), &url).await?;
        Ok(())
    }

    /// `POST /viewed`
    pub async fn track_viewed(&self, breed: &str) -> ApiResult<()> {
        let url = self.endpoint(&["viewed"]);
        let request = self.http.post(url.clone()).json(&ViewedPayload { breed });
        let _: Ack = self.fetch_json(request, &url).await?;
        Ok(())
    }

    /// `GET /viewed`, most recent first
    pub async fn recently_viewed(&self) -> ApiResult<Vec<String>> {
        self.get_json(self.endpoint(&["viewed"])).await
    }

    /// Raw bytes of an image. Image URLs are absolute and usually live on
    /// another host, so the base URL is not involved.
    pub async fn image_bytes(&self, image_url: &str) -> ApiResult<Vec<u8>> {
        let url = Url::parse(image_url).map_err(|err| ApiError::Transport {
            url: image_url.to_string(),
            reason: err.to_string(),
        })?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| ApiError::Transport {
                url: image_url.to_string(),
                reason: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::RequestFailed {
                url: image_url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|err| ApiError::Transport {
            url: image_url.to_string(),
            reason: err.to_string(),
        })?;
        Ok(bytes.to_vec())
    }
}

/// Walk a paged breed listing strictly one request at a time.
///
/// Stops on an empty page, a short page, or once the server-reported total
/// has been collected. A missing total falls back to the chunk length.
pub async fn collect_breed_pages<F, Fut>(limit: u32, mut fetch_page: F) -> ApiResult<Vec<String>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = ApiResult<BreedPage>>,
{
    let mut page = 1;
    let mut all: Vec<String> = Vec::new();
    let mut total: Option<usize> = None;

    while total.map_or(true, |total| all.len() < total) {
        let chunk = fetch_page(page).await?;
        let received = chunk.breeds.len();
        total = Some(chunk.total.unwrap_or(received));
        all.extend(chunk.breeds);

        if received == 0 || received < limit as usize {
            break;
        }
        page += 1;
    }

    Ok(all)
}
