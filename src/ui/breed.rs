use iced::widget::{button, column, container, mouse_area, row, scrollable, text, Column, Space};
use iced::{mouse, Alignment, Element, Length};

use super::{grid, picture, placeholder, skeleton, style, IMAGE_CARD_WIDTH, IMAGE_HEIGHT};
use crate::message::Message;
use crate::state::breed::{BreedGallery, ImageCard};
use crate::state::data::Route;
use crate::state::images::ImageCache;

/// Skeleton cards shown while the first page loads
const SKELETON_CARDS: usize = 6;

fn image_card<'a>(breed: &str, card: &ImageCard, images: &ImageCache) -> Element<'a, Message> {
    let zoom = Message::ZoomOpened {
        url: card.url.clone(),
        alt: format!("{breed} zoomed image"),
    };

    let picture = mouse_area(picture::cover(images, &card.url, IMAGE_HEIGHT))
        .on_press(zoom)
        .interaction(mouse::Interaction::Pointer);

    let actions = row![
        button(text(card.like_label()).size(12))
            .padding([8, 12])
            .on_press(Message::LikeToggled(card.url.clone())),
        button(text("Share").size(12))
            .padding([8, 12])
            .style(button::secondary)
            .on_press(Message::ShareLink {
                breed: breed.to_string(),
                image: Some(card.url.clone()),
                toast: "Image link copied.",
            }),
        button(text("Copy URL").size(12))
            .padding([8, 12])
            .style(button::secondary)
            .on_press(Message::CopyText {
                text: card.url.clone(),
                toast: "Image URL copied.",
            }),
    ]
    .spacing(8);

    container(column![picture, actions].spacing(12))
        .padding(12)
        .width(Length::Fixed(IMAGE_CARD_WIDTH))
        .style(style::card)
        .into()
}

/// The breed detail screen
pub fn view<'a>(gallery: &'a BreedGallery, images: &'a ImageCache) -> Element<'a, Message> {
    let header = row![
        text(gallery.breed.as_str()).size(32),
        Space::with_width(Length::Fill),
        button(text("Back to breeds").size(14))
            .style(button::secondary)
            .on_press(Message::Navigate(Route::Catalog)),
    ]
    .align_y(Alignment::Center);

    let mut body = Column::new().spacing(16).push(header);

    if gallery.shows_skeleton() {
        body = body.push(skeleton::cards(SKELETON_CARDS, IMAGE_CARD_WIDTH, 288.0));
    } else if !gallery.cards.is_empty() {
        body = body.push(grid(
            gallery
                .cards
                .iter()
                .map(|card| image_card(&gallery.breed, card, images))
                .collect(),
        ));
    }

    if let Some(notice) = &gallery.notice {
        body = body.push(placeholder::view(notice, Some(Message::LoadMore)));
    }

    let load_more = button(text(gallery.button.label()).size(14))
        .padding([10, 20])
        .on_press_maybe(gallery.button.enabled().then_some(Message::LoadMore));

    body = body.push(container(load_more).center_x(Length::Fill));

    scrollable(body.padding(24)).height(Length::Fill).into()
}
