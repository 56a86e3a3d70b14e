use std::collections::{HashMap, HashSet, VecDeque};

use iced::widget::image::Handle;

/// Download state of one image URL
#[derive(Debug, Clone)]
pub enum ImageSlot {
    Loading,
    Ready(Handle),
    Failed,
}

/// In-memory cache of downloaded images keyed by URL.
///
/// Settled entries (ready or failed) are capped at `capacity` and evicted
/// oldest first. URLs requested by the current screen are pinned and never
/// evicted, so a card on screen never loses its image; pins are dropped on
/// navigation.
#[derive(Debug)]
pub struct ImageCache {
    slots: HashMap<String, ImageSlot>,
    /// Settled URLs, oldest first
    order: VecDeque<String>,
    /// URLs the current screen shows
    pinned: HashSet<String>,
    capacity: usize,
}

impl ImageCache {
    pub fn new(capacity: usize) -> Self {
        ImageCache {
            slots: HashMap::new(),
            order: VecDeque::new(),
            pinned: HashSet::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&self, url: &str) -> Option<&ImageSlot> {
        self.slots.get(url)
    }

    /// Pin the given URLs to the current screen and return the ones that
    /// still need a download (not cached, not in flight). Failed URLs are
    /// retried.
    pub fn request<I, S>(&mut self, urls: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut missing = Vec::new();
        for url in urls {
            let url = url.as_ref();
            self.pinned.insert(url.to_string());
            match self.slots.get(url) {
                Some(ImageSlot::Loading) | Some(ImageSlot::Ready(_)) => {}
                Some(ImageSlot::Failed) | None => {
                    self.slots.insert(url.to_string(), ImageSlot::Loading);
                    missing.push(url.to_string());
                }
            }
        }
        missing
    }

    /// Store downloaded bytes for `url`
    pub fn insert(&mut self, url: String, bytes: Vec<u8>) {
        self.settle(url, ImageSlot::Ready(Handle::from_bytes(bytes)));
    }

    pub fn fail(&mut self, url: String) {
        self.settle(url, ImageSlot::Failed);
    }

    /// Unpin everything; called when the screen changes
    pub fn release(&mut self) {
        self.pinned.clear();
        self.evict();
    }

    /// Number of decoded images held
    pub fn ready_count(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| matches!(slot, ImageSlot::Ready(_)))
            .count()
    }

    fn settle(&mut self, url: String, slot: ImageSlot) {
        self.order.retain(|cached| cached != &url);
        self.order.push_back(url.clone());
        self.slots.insert(url, slot);
        self.evict();
    }

    fn evict(&mut self) {
        let mut excess = self.order.len().saturating_sub(self.capacity);
        if excess == 0 {
            return;
        }

        let pinned = &self.pinned;
        let slots = &mut self.slots;
        self.order.retain(|url| {
            if excess == 0 || pinned.contains(url) {
                return true;
            }
            slots.remove(url);
            excess -= 1;
            false
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_skips_in_flight_and_cached() {
        let mut cache = ImageCache::new(10);
        assert_eq!(cache.request(["a", "b"]), vec!["a", "b"]);
        assert!(cache.request(["a", "b"]).is_empty());

        cache.insert("a".into(), vec![1, 2, 3]);
        assert!(matches!(cache.get("a"), Some(ImageSlot::Ready(_))));
        assert!(cache.request(["a"]).is_empty());
    }

    #[test]
    fn test_failed_images_are_retried() {
        let mut cache = ImageCache::new(10);
        cache.request(["a"]);
        cache.fail("a".into());
        assert!(matches!(cache.get("a"), Some(ImageSlot::Failed)));
        assert_eq!(cache.request(["a"]), vec!["a"]);
    }

    #[test]
    fn test_oldest_image_evicted() {
        let mut cache = ImageCache::new(2);
        cache.insert("a".into(), vec![0]);
        cache.insert("b".into(), vec![0]);
        cache.insert("c".into(), vec![0]);

        assert_eq!(cache.ready_count(), 2);
        assert!(cache.get("a").is_none());
        assert!(cache.get("c").is_some());
        assert_eq!(cache.request(["a"]), vec!["a"]);
    }

    #[test]
    fn test_images_on_screen_are_kept_past_capacity() {
        let mut cache = ImageCache::new(2);
        let shown = cache.request(["a", "b", "c"]);
        for url in shown {
            cache.insert(url, vec![0]);
        }

        assert_eq!(cache.ready_count(), 3);
        assert!(matches!(cache.get("a"), Some(ImageSlot::Ready(_))));

        // leaving the screen lets the oldest go
        cache.release();
        assert_eq!(cache.ready_count(), 2);
        assert!(cache.get("a").is_none());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_failed_images_count_toward_capacity() {
        let mut cache = ImageCache::new(2);
        for url in ["x", "y", "z"] {
            cache.fail(url.into());
        }

        assert!(cache.get("x").is_none());
        assert!(matches!(cache.get("y"), Some(ImageSlot::Failed)));
        assert!(matches!(cache.get("z"), Some(ImageSlot::Failed)));
    }
}
