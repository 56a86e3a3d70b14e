use std::time::{Duration, Instant};

use iced::alignment::{Horizontal, Vertical};
use iced::widget::{container, text, Column};
use iced::{Background, Border, Color, Element, Length, Theme};

/// How long a toast stays fully visible
pub const DISPLAY_DURATION: Duration = Duration::from_millis(2200);
/// Fade in and fade out time
pub const FADE_DURATION: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    fn background(self) -> Color {
        match self {
            Severity::Info => Color::from_rgb8(0x0f, 0x17, 0x2a),
            Severity::Success => Color::from_rgb8(0x05, 0x96, 0x69),
            Severity::Error => Color::from_rgb8(0xe1, 0x1d, 0x48),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    shown_at: Instant,
}

impl Toast {
    /// 0.0 to 1.0: ramps up over the fade, holds, then ramps down
    pub fn opacity(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.shown_at);
        let fade = FADE_DURATION.as_secs_f32();

        if elapsed < FADE_DURATION {
            elapsed.as_secs_f32() / fade
        } else if elapsed < DISPLAY_DURATION {
            1.0
        } else {
            let leaving = (elapsed - DISPLAY_DURATION).as_secs_f32();
            (1.0 - leaving / fade).max(0.0)
        }
    }

    fn expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= DISPLAY_DURATION + FADE_DURATION
    }
}

/// Transient notifications stacked in the bottom-right corner.
///
/// No queue and no dismissal: each toast lives for its display time plus
/// the fade, and concurrent toasts simply stack.
#[derive(Debug, Clone)]
pub struct Toasts {
    items: Vec<Toast>,
    now: Instant,
}

impl Default for Toasts {
    fn default() -> Self {
        Toasts {
            items: Vec::new(),
            now: Instant::now(),
        }
    }
}

impl Toasts {
    pub fn push(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        let message = message.into();
        log::debug!("toast ({:?}): {}", severity, message);
        self.now = now;
        self.items.push(Toast {
            message,
            severity,
            shown_at: now,
        });
    }

    /// Advance the clock and drop expired toasts
    pub fn tick(&mut self, now: Instant) {
        self.now = now;
        self.items.retain(|toast| !toast.expired(now));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn view<'a, Message: 'a>(&'a self) -> Element<'a, Message> {
        let now = self.now;
        let stacked = self.items.iter().map(|toast| -> Element<'a, Message> {
            let alpha = toast.opacity(now);
            let background = Color {
                a: alpha,
                ..toast.severity.background()
            };

            container(text(toast.message.as_str()).size(14))
                .padding([12, 16])
                .max_width(360.0)
                .style(move |_theme: &Theme| container::Style {
                    background: Some(Background::Color(background)),
                    text_color: Some(Color { a: alpha, ..Color::WHITE }),
                    border: Border {
                        radius: 12.0.into(),
                        ..Border::default()
                    },
                    ..container::Style::default()
                })
                .into()
        });

        container(Column::with_children(stacked).spacing(8))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(20)
            .align_x(Horizontal::Right)
            .align_y(Vertical::Bottom)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_lifetime() {
        let start = Instant::now();
        let mut toasts = Toasts::default();
        toasts.push("Image added to likes.", Severity::Success, start);

        toasts.tick(start + Duration::from_millis(2000));
        assert_eq!(toasts.len(), 1);

        toasts.tick(start + Duration::from_millis(2449));
        assert_eq!(toasts.len(), 1);

        toasts.tick(start + Duration::from_millis(2450));
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_concurrent_toasts_stack() {
        let start = Instant::now();
        let mut toasts = Toasts::default();
        toasts.push("one", Severity::Info, start);
        toasts.push("two", Severity::Error, start + Duration::from_millis(1000));

        toasts.tick(start + Duration::from_millis(2500));
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts.items[0].message, "two");
    }

    #[test]
    fn test_opacity_fades_in_and_out() {
        let start = Instant::now();
        let toast = Toast {
            message: "hi".into(),
            severity: Severity::Info,
            shown_at: start,
        };

        assert_eq!(toast.opacity(start), 0.0);
        assert_eq!(toast.opacity(start + Duration::from_millis(1000)), 1.0);
        let leaving = toast.opacity(start + Duration::from_millis(2325));
        assert!(leaving > 0.0 && leaving < 1.0);
        assert_eq!(toast.opacity(start + Duration::from_millis(2450)), 0.0);
    }
}
