use iced::widget::{button, center, column, container, mouse_area, opaque, row, text, Space};
use iced::{Element, Length};

use super::{picture, style};
use crate::state::images::ImageCache;

/// The image currently shown full screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zoomed {
    pub url: String,
    pub alt: String,
}

/// A single full-screen image overlay, reused across opens.
///
/// While open the overlay sits above the screen and takes every pointer and
/// wheel event, so the screen underneath cannot scroll.
#[derive(Debug, Clone, Default)]
pub struct ZoomOverlay {
    shown: Option<Zoomed>,
}

impl ZoomOverlay {
    pub fn open(&mut self, url: impl Into<String>, alt: impl Into<String>) {
        self.shown = Some(Zoomed {
            url: url.into(),
            alt: alt.into(),
        });
    }

    /// Returns true if the overlay was open
    pub fn close(&mut self) -> bool {
        self.shown.take().is_some()
    }

    pub fn is_open(&self) -> bool {
        self.shown.is_some()
    }

    /// Scroll lock follows the overlay
    pub fn locks_scroll(&self) -> bool {
        self.is_open()
    }

    pub fn shown(&self) -> Option<&Zoomed> {
        self.shown.as_ref()
    }

    pub fn view<'a, Message: Clone + 'a>(
        &'a self,
        images: &'a ImageCache,
        on_close: Message,
    ) -> Option<Element<'a, Message>> {
        let shown = self.shown()?;

        let close = button(text("Close").size(14))
            .padding([6, 12])
            .style(button::secondary)
            .on_press(on_close.clone());

        let panel = column![
            row![Space::with_width(Length::Fill), close],
            picture::full(images, &shown.url),
            text(shown.alt.as_str()).size(12),
        ]
        .spacing(12)
        .max_width(1100.0);

        let backdrop = mouse_area(
            center(opaque(panel))
                .padding(24)
                .style(style::backdrop),
        )
        .on_press(on_close);

        Some(opaque(backdrop))
    }
}

/// Container used by modals that are not the zoom overlay
pub fn modal<'a, Message: Clone + 'a>(content: Element<'a, Message>, on_close: Message) -> Element<'a, Message> {
    let panel = container(content)
        .padding(24)
        .max_width(720.0)
        .style(style::panel);

    opaque(
        mouse_area(center(opaque(panel)).padding(24).style(style::backdrop)).on_press(on_close),
    )
}
