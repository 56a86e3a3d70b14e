use iced::widget::{center, container, image, text};
use iced::{ContentFit, Element, Length};

use super::{skeleton, style};
use crate::state::images::{ImageCache, ImageSlot};

/// Fixed-height cropped image for cards. Shows a skeleton tile until the
/// bytes arrive.
pub fn cover<'a, Message: 'a>(images: &ImageCache, url: &str, height: f32) -> Element<'a, Message> {
    match images.get(url) {
        Some(ImageSlot::Ready(handle)) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(height))
            .content_fit(ContentFit::Cover)
            .into(),
        Some(ImageSlot::Failed) => unavailable(Length::Fixed(height)),
        Some(ImageSlot::Loading) | None => skeleton::tile(Length::Fill, height),
    }
}

/// Whole image scaled to fit, for the zoom overlay
pub fn full<'a, Message: 'a>(images: &ImageCache, url: &str) -> Element<'a, Message> {
    match images.get(url) {
        Some(ImageSlot::Ready(handle)) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into(),
        Some(ImageSlot::Failed) => unavailable(Length::Fixed(320.0)),
        Some(ImageSlot::Loading) | None => skeleton::tile(Length::Fill, 320.0),
    }
}

fn unavailable<'a, Message: 'a>(height: Length) -> Element<'a, Message> {
    container(center(text("Image unavailable").size(12)))
        .width(Length::Fill)
        .height(height)
        .style(style::skeleton)
        .into()
}
