use iced::widget::{button, column, container, text};
use iced::{Element, Length};

use super::style;
use crate::state::data::Notice;

/// Empty/error block. Error blocks get a Retry button when `on_retry` is
/// given; empty blocks never do.
pub fn view<'a, Message: Clone + 'a>(notice: &Notice, on_retry: Option<Message>) -> Element<'a, Message> {
    let kind = notice.kind;
    let mut content = column![text(notice.message).size(14)].spacing(12);

    if let Some(retry) = on_retry.filter(|_| notice.is_error()) {
        content = content.push(
            button(text("Retry").size(12))
                .padding([8, 12])
                .on_press(retry),
        );
    }

    container(content)
        .width(Length::Fill)
        .padding(16)
        .style(move |theme| style::notice(theme, kind))
        .into()
}
