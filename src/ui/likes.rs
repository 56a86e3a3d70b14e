use iced::widget::{button, column, container, mouse_area, row, scrollable, text, Column};
use iced::{mouse, Element, Length};

use super::{grid, picture, placeholder, skeleton, style, IMAGE_CARD_WIDTH, IMAGE_HEIGHT};
use crate::api::LikeRecord;
use crate::message::Message;
use crate::state::data::Route;
use crate::state::images::ImageCache;
use crate::state::likes::LikesBoard;

fn like_card<'a>(like: &LikeRecord, images: &ImageCache) -> Element<'a, Message> {
    let picture = mouse_area(picture::cover(images, &like.image_url, IMAGE_HEIGHT))
        .on_press(Message::ZoomOpened {
            url: like.image_url.clone(),
            alt: format!("{} zoomed image", like.breed),
        })
        .interaction(mouse::Interaction::Pointer);

    let actions = row![
        button(text("Open Breed").size(12))
            .padding([8, 12])
            .on_press(Message::Navigate(Route::Breed(like.breed.clone()))),
        button(text("Share").size(12))
            .padding([8, 12])
            .style(button::secondary)
            .on_press(Message::ShareLink {
                breed: like.breed.clone(),
                image: Some(like.image_url.clone()),
                toast: "Link copied to clipboard.",
            }),
        button(text("Remove").size(12))
            .padding([8, 12])
            .style(button::danger)
            .on_press(Message::RemoveLike(like.image_url.clone())),
    ]
    .spacing(8);

    container(
        column![picture, text(like.breed.clone()).size(14), actions].spacing(10),
    )
    .padding(12)
    .width(Length::Fixed(IMAGE_CARD_WIDTH))
    .style(style::card)
    .into()
}

/// The liked images screen
pub fn view<'a>(board: &'a LikesBoard, images: &'a ImageCache) -> Element<'a, Message> {
    let mut body = Column::new()
        .spacing(16)
        .push(text("Liked Images").size(32));

    body = if board.is_loading() {
        body.push(skeleton::cards(6, IMAGE_CARD_WIDTH, 300.0))
    } else if let Some(notice) = board.notice() {
        body.push(placeholder::view(&notice, Some(Message::RetryLikes)))
    } else {
        body.push(grid(
            board
                .likes
                .items()
                .iter()
                .map(|like| like_card(like, images))
                .collect(),
        ))
    };

    scrollable(body.padding(24)).height(Length::Fill).into()
}
