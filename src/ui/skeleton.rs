use iced::widget::{container, Row, Space};
use iced::{Element, Length};

use super::{grid, style};

/// One grey tile of the given size
pub fn tile<'a, Message: 'a>(width: Length, height: f32) -> Element<'a, Message> {
    container(Space::new(Length::Fill, Length::Fill))
        .width(width)
        .height(Length::Fixed(height))
        .style(style::skeleton)
        .into()
}

/// Grid of `count` card-sized tiles
pub fn cards<'a, Message: 'a>(count: usize, width: f32, height: f32) -> Element<'a, Message> {
    grid((0..count).map(|_| tile(Length::Fixed(width), height)).collect())
}

/// Row of pill-shaped tiles for the recent strip
pub fn chips<'a, Message: 'a>(count: usize) -> Element<'a, Message> {
    Row::with_children((0..count).map(|_| tile(Length::Fixed(110.0), 40.0)))
        .spacing(8)
        .into()
}
