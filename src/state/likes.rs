use super::data::{Listing, Notice, Ticket};
use crate::api::{ApiResult, LikeRecord};

pub const EMPTY_MESSAGE: &str = "You have no liked images yet.";
pub const ERROR_MESSAGE: &str = "Could not load liked images.";

/// Likes controller state
#[derive(Debug, Clone, Default)]
pub struct LikesBoard {
    /// The liked images, in server order
    pub likes: Listing<LikeRecord>,
    /// Request in flight
    load: Option<Ticket>,
}

impl LikesBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.pending().is_some()
    }

    /// Ticket of the request in flight
    pub fn pending(&self) -> Option<Ticket> {
        self.load
    }

    /// Start (re)loading the list. Returns `None` if a load is in flight.
    pub fn begin_load(&mut self) -> Option<Ticket> {
        if self.load.is_some() {
            return None;
        }
        let ticket = Ticket::next();
        self.load = Some(ticket);
        self.likes = Listing::Loading;
        Some(ticket)
    }

    /// Apply the likes list for the request tagged `ticket`. Returns the
    /// image URLs now on screen.
    pub fn finish(&mut self, ticket: Ticket, result: ApiResult<Vec<LikeRecord>>) -> Vec<String> {
        if self.load != Some(ticket) {
            log::debug!("Dropping stale likes list {:?}", ticket);
            return Vec::new();
        }
        self.load = None;
        match result {
            Ok(likes) => {
                let urls = likes.iter().map(|like| like.image_url.clone()).collect();
                self.likes = Listing::Loaded(likes);
                urls
            }
            Err(err) => {
                log::error!("Failed to load likes: {}", err);
                self.likes = Listing::Failed(Notice::error(ERROR_MESSAGE));
                Vec::new()
            }
        }
    }

    /// Drop a card after the server confirmed the delete
    pub fn remove(&mut self, image_url: &str) -> bool {
        match self.likes.items_mut() {
            Some(likes) => {
                let before = likes.len();
                likes.retain(|like| like.image_url != image_url);
                likes.len() != before
            }
            None => false,
        }
    }

    pub fn find(&self, image_url: &str) -> Option<&LikeRecord> {
        self.likes.items().iter().find(|like| like.image_url == image_url)
    }

    /// Placeholder to render instead of cards
    pub fn notice(&self) -> Option<Notice> {
        self.likes.notice(EMPTY_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    fn like(breed: &str, n: u8) -> LikeRecord {
        LikeRecord {
            image_url: format!("https://images.dog.ceo/breeds/{breed}/{n}.jpg"),
            breed: breed.to_string(),
        }
    }

    #[test]
    fn test_empty_likes_show_single_notice() {
        let mut board = LikesBoard::new();
        let ticket = board.begin_load().unwrap();
        board.finish(ticket, Ok(Vec::new()));

        let notice = board.notice().unwrap();
        assert_eq!(notice.message, "You have no liked images yet.");
        assert!(!notice.is_error());
    }

    #[test]
    fn test_load_guard() {
        let mut board = LikesBoard::new();
        let ticket = board.begin_load().unwrap();
        assert_eq!(board.begin_load(), None);
        board.finish(ticket, Ok(vec![like("akita", 1)]));
        assert!(board.begin_load().is_some());
    }

    #[test]
    fn test_list_from_earlier_board_is_dropped() {
        let mut old = LikesBoard::new();
        let stale = old.begin_load().unwrap();

        let mut board = LikesBoard::new();
        let ticket = board.begin_load().unwrap();
        assert!(board.finish(stale, Ok(vec![like("akita", 1)])).is_empty());
        assert!(board.is_loading());
        assert!(board.likes.is_loading());

        assert_eq!(board.finish(ticket, Ok(vec![like("pug", 2)])).len(), 1);
        assert_eq!(board.likes.items()[0].breed, "pug");
    }

    #[test]
    fn test_removing_last_like_shows_empty_notice() {
        let mut board = LikesBoard::new();
        let ticket = board.begin_load().unwrap();
        let urls = board.finish(ticket, Ok(vec![like("akita", 1), like("pug", 2)]));
        assert_eq!(urls.len(), 2);
        assert!(board.notice().is_none());

        assert!(board.remove(&urls[0]));
        assert!(board.notice().is_none());
        assert!(board.find(&urls[1]).is_some());

        assert!(board.remove(&urls[1]));
        assert_eq!(board.notice().unwrap().message, EMPTY_MESSAGE);
        assert!(!board.remove(&urls[1]));
    }

    #[test]
    fn test_failed_load_offers_error_notice() {
        let mut board = LikesBoard::new();
        let ticket = board.begin_load().unwrap();
        board.finish(
            ticket,
            Err(ApiError::Transport {
                url: "/likes".into(),
                reason: "connection refused".into(),
            }),
        );

        let notice = board.notice().unwrap();
        assert!(notice.is_error());
        assert_eq!(notice.message, ERROR_MESSAGE);
        assert!(!board.is_loading());
    }
}
