use iced::widget::container;
use iced::{Background, Border, Color, Theme};

use crate::state::data::NoticeKind;

/// Image and breed cards
pub fn card(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.background.base.color)),
        border: Border {
            radius: 16.0.into(),
            width: 1.0,
            color: palette.background.strong.color,
        },
        ..container::Style::default()
    }
}

/// Grey placeholder tile shown while content loads
pub fn skeleton(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.background.weak.color)),
        border: Border {
            radius: 16.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

/// Empty and error placeholder blocks
pub fn notice(theme: &Theme, kind: NoticeKind) -> container::Style {
    let palette = theme.extended_palette();
    let (background, border) = match kind {
        NoticeKind::Error => (palette.danger.weak.color, palette.danger.base.color),
        NoticeKind::Empty => (palette.background.weak.color, palette.background.strong.color),
    };
    container::Style {
        background: Some(Background::Color(Color { a: 0.4, ..background })),
        border: Border {
            radius: 16.0.into(),
            width: 1.0,
            color: border,
        },
        ..container::Style::default()
    }
}

/// Dimmed layer behind the zoom overlay and the preview modal
pub fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.8))),
        ..container::Style::default()
    }
}

/// Modal panel surface
pub fn panel(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.background.base.color)),
        border: Border {
            radius: 20.0.into(),
            width: 1.0,
            color: palette.background.strong.color,
        },
        ..container::Style::default()
    }
}
