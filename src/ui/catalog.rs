use iced::widget::{
    button, column, container, pick_list, row, scrollable, text, text_input, Column, Row, Space,
};
use iced::{Alignment, Element, Length};

use super::{grid, picture, placeholder, skeleton, zoom};
use crate::message::Message;
use crate::state::catalog::{Catalog, Filter, Preview, Sort, PREVIEW_COUNT, PREVIEW_EMPTY_MESSAGE};
use crate::state::data::{Listing, Route};
use crate::state::images::ImageCache;

const BREED_CARD_WIDTH: f32 = 210.0;
const PREVIEW_TILE_WIDTH: f32 = 150.0;

/// Scroll area holding the breed grid
pub fn breed_scroll_id() -> scrollable::Id {
    scrollable::Id::new("breed-scroll-area")
}

fn breed_card<'a>(breed: &'a str) -> Element<'a, Message> {
    button(
        column![
            text(breed).size(15),
            text("Tap for details").size(12),
        ]
        .spacing(4),
    )
    .width(Length::Fixed(BREED_CARD_WIDTH))
    .padding(16)
    .style(button::secondary)
    .on_press(Message::PreviewOpened(breed.to_string()))
    .into()
}

fn recent_strip<'a>(catalog: &'a Catalog) -> Element<'a, Message> {
    if catalog.recent.is_loading() {
        return skeleton::chips(5);
    }
    if let Some(notice) = catalog.recent_notice() {
        return placeholder::view(&notice, Some(Message::RetryRecent));
    }

    Row::with_children(catalog.recent.items().iter().map(|breed| -> Element<'a, Message> {
        button(text(breed.as_str()).size(14))
            .padding([8, 16])
            .style(button::secondary)
            .on_press(Message::PreviewOpened(breed.clone()))
            .into()
    }))
    .spacing(8)
    .into()
}

fn breed_grid(catalog: &Catalog) -> Element<'_, Message> {
    if catalog.breeds.is_loading() {
        return skeleton::cards(8, BREED_CARD_WIDTH, 96.0);
    }
    if let Some(notice) = catalog.notice() {
        return placeholder::view(&notice, Some(Message::RetryBreeds));
    }

    grid(catalog.visible().into_iter().map(breed_card).collect())
}

/// The catalog screen
pub fn view<'a>(catalog: &'a Catalog) -> Element<'a, Message> {
    let controls = row![
        text_input("Search breeds...", &catalog.query)
            .on_input(Message::SearchChanged)
            .padding(10)
            .width(Length::Fill),
        pick_list(Filter::ALL, Some(catalog.filter), Message::FilterChanged),
        pick_list(Sort::ALL, Some(catalog.sort), Message::SortChanged),
        button(text("Refresh gallery").size(14))
            .padding([10, 16])
            .on_press_maybe((!catalog.is_loading()).then_some(Message::RefreshGallery)),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let list_header = row![
        text("Breeds").size(20),
        Space::with_width(Length::Fill),
        button(text("Top").size(12))
            .style(button::secondary)
            .on_press(Message::ScrollTop),
        button(text("Bottom").size(12))
            .style(button::secondary)
            .on_press(Message::ScrollBottom),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let breeds = scrollable(container(breed_grid(catalog)).padding([0, 4]))
        .id(breed_scroll_id())
        .height(Length::Fill);

    column![
        text("Dog Breeds").size(32),
        controls,
        text("Recently viewed").size(16),
        recent_strip(catalog),
        list_header,
        breeds,
    ]
    .spacing(16)
    .padding(24)
    .into()
}

fn preview_images<'a>(preview: &'a Preview, images: &'a ImageCache) -> Element<'a, Message> {
    match &preview.images {
        Listing::Loading => skeleton::cards(PREVIEW_COUNT as usize, PREVIEW_TILE_WIDTH, 96.0),
        listing => match listing.notice(PREVIEW_EMPTY_MESSAGE) {
            Some(notice) => placeholder::view(&notice, Some(Message::PreviewRetry)),
            None => grid(
                listing
                    .items()
                    .iter()
                    .map(|url| {
                        container(picture::cover(images, url, 96.0))
                            .width(Length::Fixed(PREVIEW_TILE_WIDTH))
                            .into()
                    })
                    .collect(),
            ),
        },
    }
}

/// The preview modal, when a breed is selected
pub fn preview<'a>(catalog: &'a Catalog, images: &'a ImageCache) -> Option<Element<'a, Message>> {
    let preview = catalog.preview.as_ref()?;
    let breed = preview.breed.clone();

    let header = row![
        text(preview.breed.as_str()).size(24),
        Space::with_width(Length::Fill),
        button(text("Close").size(12))
            .style(button::secondary)
            .on_press(Message::PreviewClosed),
    ]
    .align_y(Alignment::Center);

    let actions = row![
        button(text("Open").size(14))
            .padding([8, 16])
            .on_press(Message::Navigate(Route::Breed(breed.clone()))),
        button(text("Share").size(14))
            .padding([8, 16])
            .style(button::secondary)
            .on_press(Message::ShareLink {
                breed: breed.clone(),
                image: None,
                toast: "Link copied to clipboard.",
            }),
        button(text("Copy Link").size(14))
            .padding([8, 16])
            .style(button::secondary)
            .on_press(Message::ShareLink {
                breed,
                image: None,
                toast: "Breed link copied.",
            }),
    ]
    .spacing(8);

    let content = Column::new()
        .spacing(16)
        .push(header)
        .push(preview_images(preview, images))
        .push(actions);

    Some(zoom::modal(content.into(), Message::PreviewClosed))
}
