use std::time::{Duration, Instant};

use iced::widget::{button, column, container, row, scrollable, text, Space, Stack};
use iced::{event, keyboard, Alignment, Element, Length, Subscription, Task, Theme};

use crate::api::ApiClient;
use crate::config::{Config, ThemeChoice};
use crate::message::Message;
use crate::state::breed::{self, BreedGallery};
use crate::state::catalog::{self, BreedsRequest, Catalog};
use crate::state::data::{Route, Ticket};
use crate::state::images::ImageCache;
use crate::state::likes::LikesBoard;
use crate::ui;
use crate::ui::toast::{Severity, Toasts};
use crate::ui::zoom::ZoomOverlay;

/// How often toasts are re-rendered while any are on screen
const TOAST_TICK: Duration = Duration::from_millis(50);

/// The controller for the current route
enum Screen {
    Catalog(Catalog),
    Breed(BreedGallery),
    Likes(LikesBoard),
}

/// Main application state
pub struct DogGallery {
    client: ApiClient,
    theme: ThemeChoice,
    screen: Screen,
    images: ImageCache,
    toasts: Toasts,
    zoom: ZoomOverlay,
}

impl DogGallery {
    /// Create the application and start loading the first screen
    pub fn new(config: Config, client: ApiClient, start: Route) -> (Self, Task<Message>) {
        let mut app = DogGallery {
            client,
            theme: config.theme,
            screen: Screen::Catalog(Catalog::new()),
            images: ImageCache::new(config.image_cache_capacity),
            toasts: Toasts::default(),
            zoom: ZoomOverlay::default(),
        };

        let task = app.navigate(start);
        (app, task)
    }

    pub fn title(&self) -> String {
        format!("Dog Gallery - {}", self.route().title())
    }

    pub fn theme(&self) -> Theme {
        match self.theme {
            ThemeChoice::Dark => Theme::Dark,
            ThemeChoice::Light => Theme::Light,
        }
    }

    fn route(&self) -> Route {
        match &self.screen {
            Screen::Catalog(_) => Route::Catalog,
            Screen::Breed(gallery) => Route::Breed(gallery.breed.clone()),
            Screen::Likes(_) => Route::Likes,
        }
    }

    fn overlay_open(&self) -> bool {
        self.zoom.locks_scroll() || matches!(&self.screen, Screen::Catalog(catalog) if catalog.preview.is_some())
    }

    /// Replace the current controller with a fresh one for `route`
    fn navigate(&mut self, route: Route) -> Task<Message> {
        log::info!("Opening {:?}", route);
        self.zoom.close();
        // images of the old screen may be evicted from now on
        self.images.release();

        match route {
            Route::Catalog => {
                let mut catalog = Catalog::new();
                let mut tasks = Vec::new();
                if let Some(request) = catalog.begin_load() {
                    tasks.push(load_breeds(&self.client, request));
                }
                if let Some(ticket) = catalog.begin_recent() {
                    tasks.push(load_recent(&self.client, ticket));
                }
                self.screen = Screen::Catalog(catalog);
                Task::batch(tasks)
            }
            Route::Breed(name) => {
                let mut gallery = BreedGallery::new(name.clone());

                // Record the visit; a failure is only logged
                let client = self.client.clone();
                let breed = name.clone();
                let mut tasks = vec![Task::perform(
                    async move { Message::ViewTracked(client.track_viewed(&breed).await) },
                    |message| message,
                )];

                if let Some((ticket, page)) = gallery.begin_reset() {
                    tasks.push(load_images(&self.client, name, ticket, page));
                }
                self.screen = Screen::Breed(gallery);
                Task::batch(tasks)
            }
            Route::Likes => {
                let mut board = LikesBoard::new();
                let task = match board.begin_load() {
                    Some(ticket) => load_likes(&self.client, ticket),
                    None => Task::none(),
                };
                self.screen = Screen::Likes(board);
                task
            }
        }
    }

    /// Handle application messages and update state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(route) => self.navigate(route),
            Message::ImageLoaded { url, result } => {
                match result {
                    Ok(bytes) => {
                        self.images.insert(url, bytes);
                        log::debug!("{} images cached", self.images.ready_count());
                    }
                    Err(err) => {
                        log::warn!("Image download failed: {}", err);
                        self.images.fail(url);
                    }
                }
                Task::none()
            }
            Message::Tick(now) => {
                self.toasts.tick(now);
                Task::none()
            }
            Message::EscapePressed => {
                // Zoom sits above the preview modal, so it closes first
                if !self.zoom.close() {
                    if let Screen::Catalog(catalog) = &mut self.screen {
                        catalog.close_preview();
                    }
                }
                Task::none()
            }
            Message::ZoomOpened { url, alt } => {
                let task = request_images(&mut self.images, &self.client, [url.as_str()]);
                self.zoom.open(url, alt);
                task
            }
            Message::ZoomClosed => {
                self.zoom.close();
                Task::none()
            }
            Message::ShareLink { breed, image, toast } => {
                let link = self
                    .client
                    .link(&Route::Breed(breed).segments(), image.as_deref());
                self.toasts.push(toast, Severity::Success, Instant::now());
                iced::clipboard::write(link)
            }
            Message::CopyText { text, toast } => {
                self.toasts.push(toast, Severity::Success, Instant::now());
                iced::clipboard::write(text)
            }
            message @ (Message::BreedsLoaded { .. }
            | Message::RecentLoaded { .. }
            | Message::SearchChanged(_)
            | Message::FilterChanged(_)
            | Message::SortChanged(_)
            | Message::RetryBreeds
            | Message::RetryRecent
            | Message::RefreshGallery
            | Message::ScrollTop
            | Message::ScrollBottom
            | Message::PreviewOpened(_)
            | Message::PreviewLoaded { .. }
            | Message::PreviewRetry
            | Message::PreviewClosed) => self.update_catalog(message),
            message @ (Message::ViewTracked(_)
            | Message::ImagesLoaded { .. }
            | Message::LoadMore
            | Message::LikeToggled(_)
            | Message::LikeSettled { .. }) => self.update_breed(message),
            message @ (Message::LikesLoaded { .. }
            | Message::RetryLikes
            | Message::RemoveLike(_)
            | Message::LikeRemoved { .. }) => self.update_likes(message),
        }
    }

    fn update_catalog(&mut self, message: Message) -> Task<Message> {
        let Screen::Catalog(catalog) = &mut self.screen else {
            log::debug!("Catalog message after leaving the catalog: {:?}", message);
            return Task::none();
        };

        match message {
            Message::BreedsLoaded { ticket, result } => {
                let mut task = Task::none();

                // Filter or sort changed mid-load: fetch again with the new
                // choice, and let a pending refresh wait for that instead
                if catalog.finish_load(ticket, result) {
                    if let Some(request) = catalog.begin_load() {
                        catalog.follow_refresh(ticket, request.ticket);
                        task = load_breeds(&self.client, request);
                    }
                }

                if catalog.settle_refresh(ticket) {
                    self.toasts.push("Gallery refreshed.", Severity::Success, Instant::now());
                }
                task
            }
            Message::RecentLoaded { ticket, result } => {
                catalog.finish_recent(ticket, result);
                if catalog.settle_refresh(ticket) {
                    self.toasts.push("Gallery refreshed.", Severity::Success, Instant::now());
                }
                Task::none()
            }
            Message::SearchChanged(query) => {
                // Search narrows the loaded list; no request
                catalog.query = query;
                Task::none()
            }
            Message::FilterChanged(filter) => {
                catalog.filter = filter;
                reload_breeds(catalog, &self.client)
            }
            Message::SortChanged(sort) => {
                catalog.sort = sort;
                reload_breeds(catalog, &self.client)
            }
            Message::RetryBreeds => reload_breeds(catalog, &self.client),
            Message::RetryRecent => match catalog.begin_recent() {
                Some(ticket) => load_recent(&self.client, ticket),
                None => Task::none(),
            },
            Message::RefreshGallery => {
                // Loads already in flight are waited on, not repeated
                let (breeds, recent) = catalog.begin_refresh();
                let mut tasks = Vec::new();
                if let Some(request) = breeds {
                    tasks.push(load_breeds(&self.client, request));
                }
                if let Some(ticket) = recent {
                    tasks.push(load_recent(&self.client, ticket));
                }
                Task::batch(tasks)
            }
            Message::ScrollTop => {
                scrollable::snap_to(ui::catalog::breed_scroll_id(), scrollable::RelativeOffset::START)
            }
            Message::ScrollBottom => {
                scrollable::snap_to(ui::catalog::breed_scroll_id(), scrollable::RelativeOffset::END)
            }
            Message::PreviewOpened(breed) => {
                let ticket = catalog.open_preview(&breed);
                load_preview(&self.client, breed, ticket)
            }
            Message::PreviewRetry => match catalog.active_breed().map(str::to_string) {
                Some(breed) => {
                    let ticket = catalog.open_preview(&breed);
                    load_preview(&self.client, breed, ticket)
                }
                None => Task::none(),
            },
            Message::PreviewLoaded { ticket, result } => {
                let shown = catalog.finish_preview(ticket, result);
                request_images(&mut self.images, &self.client, &shown)
            }
            Message::PreviewClosed => {
                catalog.close_preview();
                Task::none()
            }
            _ => Task::none(),
        }
    }

    fn update_breed(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ViewTracked(result) => {
                if let Err(err) = result {
                    log::error!("Failed to track viewed breed: {}", err);
                }
                Task::none()
            }
            Message::LikeSettled { url, liked, result } => {
                match result {
                    Ok(()) if liked => {
                        self.toasts.push("Image added to likes.", Severity::Success, Instant::now())
                    }
                    Ok(()) => {
                        self.toasts.push("Image removed from likes.", Severity::Info, Instant::now())
                    }
                    Err(err) => {
                        // the card keeps its optimistic state
                        if liked && err.status() == Some(400) {
                            log::warn!("{} was already liked", url);
                        } else {
                            log::error!("Failed to toggle like for {}: {}", url, err);
                        }
                        self.toasts.push("Could not update like.", Severity::Error, Instant::now());
                    }
                }
                Task::none()
            }
            message => {
                let Screen::Breed(gallery) = &mut self.screen else {
                    log::debug!("Breed message after leaving the breed screen: {:?}", message);
                    return Task::none();
                };

                match message {
                    Message::ImagesLoaded { ticket, result } => {
                        // Append the page, then download the new cards' images
                        let added = gallery.finish(ticket, result);
                        log::debug!(
                            "{} page {} settled, {} new images, exhausted: {}",
                            gallery.breed,
                            gallery.page(),
                            added.len(),
                            gallery.is_exhausted()
                        );
                        request_images(&mut self.images, &self.client, &added)
                    }
                    Message::LoadMore => match gallery.begin_load_more() {
                        Some((ticket, page)) => {
                            load_images(&self.client, gallery.breed.clone(), ticket, page)
                        }
                        None => Task::none(),
                    },
                    Message::LikeToggled(url) => match gallery.toggle_like(&url) {
                        // Flip the card now, tell the server afterwards
                        Some(liked) => toggle_like(&self.client, gallery.breed.clone(), url, liked),
                        None => Task::none(),
                    },
                    _ => Task::none(),
                }
            }
        }
    }

    fn update_likes(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::RemoveLike(url) => {
                if let Screen::Likes(board) = &self.screen {
                    if let Some(like) = board.find(&url) {
                        log::info!("Removing liked {} image {}", like.breed, url);
                    }
                }
                let client = self.client.clone();
                Task::perform(
                    async move {
                        let result = client.unlike(&url).await;
                        Message::LikeRemoved { url, result }
                    },
                    |message| message,
                )
            }
            Message::LikeRemoved { url, result } => {
                // The card goes only once the server confirmed the delete
                match result {
                    Ok(()) => {
                        if let Screen::Likes(board) = &mut self.screen {
                            board.remove(&url);
                        }
                        self.toasts.push("Removed from likes.", Severity::Info, Instant::now());
                    }
                    Err(err) => {
                        log::error!("Remove failed: {}", err);
                        self.toasts.push("Could not remove image.", Severity::Error, Instant::now());
                    }
                }
                Task::none()
            }
            message => {
                let Screen::Likes(board) = &mut self.screen else {
                    log::debug!("Likes message after leaving the likes screen: {:?}", message);
                    return Task::none();
                };

                match message {
                    Message::LikesLoaded { ticket, result } => {
                        let shown = board.finish(ticket, result);
                        request_images(&mut self.images, &self.client, &shown)
                    }
                    Message::RetryLikes => match board.begin_load() {
                        Some(ticket) => load_likes(&self.client, ticket),
                        None => Task::none(),
                    },
                    _ => Task::none(),
                }
            }
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let tick = if self.toasts.is_empty() {
            Subscription::none()
        } else {
            iced::time::every(TOAST_TICK).map(Message::Tick)
        };

        let escape = if self.overlay_open() {
            event::listen_with(|event, _status, _window| match event {
                event::Event::Keyboard(keyboard::Event::KeyPressed {
                    key: keyboard::Key::Named(keyboard::key::Named::Escape),
                    ..
                }) => Some(Message::EscapePressed),
                _ => None,
            })
        } else {
            Subscription::none()
        };

        Subscription::batch([tick, escape])
    }

    /// Build the user interface
    pub fn view(&self) -> Element<'_, Message> {
        let route = self.route();
        let nav_button = |label: &'static str, target: Route| {
            let active = std::mem::discriminant(&route) == std::mem::discriminant(&target);
            button(text(label).size(14))
                .padding([8, 14])
                .style(if active { button::primary } else { button::text })
                .on_press(Message::Navigate(target))
        };

        let nav = container(
            row![
                text("Dog Gallery").size(20),
                Space::with_width(Length::Fill),
                nav_button("Breeds", Route::Catalog),
                nav_button("Likes", Route::Likes),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        )
        .padding([12, 24]);

        let screen = match &self.screen {
            Screen::Catalog(catalog) => ui::catalog::view(catalog),
            Screen::Breed(gallery) => ui::breed::view(gallery, &self.images),
            Screen::Likes(board) => ui::likes::view(board, &self.images),
        };

        let mut layers: Vec<Element<'_, Message>> = vec![column![nav, screen].into()];

        if let Screen::Catalog(catalog) = &self.screen {
            if let Some(modal) = ui::catalog::preview(catalog, &self.images) {
                layers.push(modal);
            }
        }
        if let Some(zoomed) = self.zoom.view(&self.images, Message::ZoomClosed) {
            layers.push(zoomed);
        }
        layers.push(self.toasts.view());

        Stack::with_children(layers)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

fn reload_breeds(catalog: &mut Catalog, client: &ApiClient) -> Task<Message> {
    match catalog.begin_load() {
        Some(request) => load_breeds(client, request),
        None => Task::none(),
    }
}

fn load_breeds(client: &ApiClient, request: BreedsRequest) -> Task<Message> {
    let client = client.clone();
    let BreedsRequest { ticket, filter, sort } = request;
    Task::perform(
        async move {
            let result = catalog::load_breed_list(client, filter, sort).await;
            Message::BreedsLoaded { ticket, result }
        },
        |message| message,
    )
}

fn load_recent(client: &ApiClient, ticket: Ticket) -> Task<Message> {
    let client = client.clone();
    Task::perform(
        async move {
            let result = client.recently_viewed().await;
            Message::RecentLoaded { ticket, result }
        },
        |message| message,
    )
}

fn load_preview(client: &ApiClient, breed: String, ticket: Ticket) -> Task<Message> {
    let client = client.clone();
    Task::perform(
        async move {
            let result = catalog::load_preview(client, breed).await;
            Message::PreviewLoaded { ticket, result }
        },
        |message| message,
    )
}

fn load_images(client: &ApiClient, breed: String, ticket: Ticket, page: u32) -> Task<Message> {
    let client = client.clone();
    Task::perform(
        async move {
            let result = breed::load_page(client, breed, page).await;
            Message::ImagesLoaded { ticket, result }
        },
        |message| message,
    )
}

fn load_likes(client: &ApiClient, ticket: Ticket) -> Task<Message> {
    let client = client.clone();
    Task::perform(
        async move {
            let result = client.likes().await;
            Message::LikesLoaded { ticket, result }
        },
        |message| message,
    )
}

fn toggle_like(client: &ApiClient, breed: String, url: String, liked: bool) -> Task<Message> {
    let client = client.clone();
    Task::perform(
        async move {
            let result = if liked {
                client.like(&url, &breed).await
            } else {
                client.unlike(&url).await
            };
            Message::LikeSettled { url, liked, result }
        },
        |message| message,
    )
}

/// Start downloads for every URL the cache does not hold yet
fn request_images<I, S>(images: &mut ImageCache, client: &ApiClient, urls: I) -> Task<Message>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let missing = images.request(urls);
    Task::batch(missing.into_iter().map(|url| {
        let client = client.clone();
        Task::perform(
            async move {
                let result = client.image_bytes(&url).await;
                Message::ImageLoaded { url, result }
            },
            |message| message,
        )
    }))
}
