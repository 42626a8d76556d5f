//! Transient toast in the bottom-right corner.

use std::time::{Duration, Instant};

use neon_core::palette;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Clear, Paragraph},
};

/// Slide in/out time at either end of a toast's life.
const SLIDE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub shown: Instant,
}

/// Shows one notification at a time; a new one replaces the old.
#[derive(Debug)]
pub struct Notifier {
    current: Option<Toast>,
    duration: Duration,
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        log::debug!("notify: {}", message);
        self.current = Some(Toast {
            message,
            shown: now,
        });
    }

    #[cfg(test)]
    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Drop the toast once its time is up.
    pub fn tick(&mut self, now: Instant) {
        if let Some(toast) = &self.current
            && now.saturating_duration_since(toast.shown) >= self.duration
        {
            self.current = None;
        }
    }

    /// Fraction of the toast visible, 0 while fully slid out.
    fn reveal(&self, toast: &Toast, now: Instant) -> f32 {
        let age = now.saturating_duration_since(toast.shown);
        let left = self.duration.saturating_sub(age);
        let edge = age.min(left);
        (edge.as_secs_f32() / SLIDE.as_secs_f32()).min(1.0)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, now: Instant) {
        let Some(toast) = &self.current else {
            return;
        };
        let Some(rect) = toast_rect(area, &toast.message, self.reveal(toast, now)) else {
            return;
        };
        let block = Block::bordered()
            .border_style(Style::new().fg(palette::ACCENT))
            .style(Style::new().bg(palette::BACKDROP));
        let text = Paragraph::new(Line::from(format!(" {} ", toast.message)))
            .style(Style::new().fg(palette::ACCENT))
            .block(block);
        frame.render_widget(Clear, rect);
        frame.render_widget(text, rect);
    }
}

/// Toast box against the bottom-right corner, pushed down by `1 - reveal`
/// of its height and cut off at the bottom of `area`.
fn toast_rect(area: Rect, message: &str, reveal: f32) -> Option<Rect> {
    let width = u16::try_from(Line::from(message).width() + 4)
        .unwrap_or(u16::MAX)
        .min(area.width.saturating_sub(2));
    let height = 3u16.min(area.height);
    let hidden = ((1.0 - reveal) * height as f32).round() as u16;
    let visible = height.saturating_sub(hidden);
    if width == 0 || visible == 0 {
        return None;
    }
    // Leave one row above the status line.
    let bottom = area.bottom().saturating_sub(2);
    let y = bottom.saturating_sub(height).saturating_add(hidden);
    let x = area.right().saturating_sub(width + 2);
    Some(Rect::new(x, y, width, visible).intersection(area))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expires() {
        let start = Instant::now();
        let mut notifier = Notifier::new(Duration::from_secs(3));
        notifier.push("Effects Enabled", start);
        notifier.tick(start + Duration::from_millis(2999));
        assert!(notifier.current().is_some());
        notifier.tick(start + Duration::from_secs(3));
        assert!(notifier.current().is_none());
    }

    #[test]
    fn test_new_toast_replaces() {
        let start = Instant::now();
        let mut notifier = Notifier::new(Duration::from_secs(3));
        notifier.push("Effects Disabled", start);
        notifier.push("Effects Enabled", start + Duration::from_secs(2));
        notifier.tick(start + Duration::from_secs(4));
        assert_eq!(
            notifier.current().map(|t| t.message.as_str()),
            Some("Effects Enabled")
        );
    }

    #[test]
    fn test_slide_in() {
        let start = Instant::now();
        let mut notifier = Notifier::new(Duration::from_secs(3));
        notifier.push("hi", start);
        let toast = notifier.current().unwrap().clone();
        assert_eq!(notifier.reveal(&toast, start), 0.0);
        assert_eq!(notifier.reveal(&toast, start + Duration::from_secs(1)), 1.0);
        assert!(notifier.reveal(&toast, start + Duration::from_millis(2850)) < 1.0);
    }

    #[test]
    fn test_rect_in_corner() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = toast_rect(area, "Effects Enabled", 1.0).unwrap();
        assert_eq!(rect, Rect::new(59, 19, 19, 3));
        assert!(toast_rect(area, "Effects Enabled", 0.0).is_none());
    }
}
