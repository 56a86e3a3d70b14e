/// User interface module
///
/// This module builds every widget tree:
/// - Screen views for the catalog, a breed, and the likes (catalog.rs, breed.rs, likes.rs)
/// - Shared blocks: toasts, empty/error placeholders, skeletons (toast.rs, placeholder.rs, skeleton.rs)
/// - The zoom overlay and modal frame (zoom.rs)
/// - Cached image rendering (picture.rs) and container styles (style.rs)

pub mod breed;
pub mod catalog;
pub mod likes;
pub mod picture;
pub mod placeholder;
pub mod skeleton;
pub mod style;
pub mod toast;
pub mod zoom;

use iced::{Element, Pixels};
use iced_aw::Wrap;

/// Width of image cards on the breed and likes screens
pub const IMAGE_CARD_WIDTH: f32 = 300.0;
/// Height of the cropped image on those cards
pub const IMAGE_HEIGHT: f32 = 224.0;

/// Cards laid out left to right, wrapping onto new lines
pub fn grid<'a, Message: 'a>(items: Vec<Element<'a, Message>>) -> Element<'a, Message> {
    Wrap::with_elements(items)
        .spacing(Pixels(16.0))
        .line_spacing(Pixels(16.0))
        .into()
}
