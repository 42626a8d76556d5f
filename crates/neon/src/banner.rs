//! Landing banner: glowing title, tagline and the section links.

use neon_config::BannerConfig;
use neon_core::{hsl_to_rgb, palette};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
};

/// Rows used by the banner block.
const BANNER_HEIGHT: u16 = 7;

/// Gap between section links.
const LINK_GAP: u16 = 2;

/// Title hue drift, degrees per second.
const HUE_SPEED: f32 = 40.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerLayout {
    pub title: Rect,
    pub tagline: Rect,
    pub links: Vec<Rect>,
    pub contact: Rect,
}

#[derive(Debug)]
pub struct Banner {
    title: String,
    tagline: String,
    sections: Vec<String>,
    contact: String,
    current: usize,
}

impl Banner {
    pub fn new(config: &BannerConfig) -> Self {
        Self {
            title: config.title.clone(),
            tagline: config.tagline.clone(),
            sections: config.sections.clone(),
            contact: config.contact.clone(),
            current: 0,
        }
    }

    #[cfg(test)]
    pub fn current(&self) -> usize {
        self.current
    }

    #[cfg(test)]
    pub fn current_label(&self) -> Option<&str> {
        self.sections.get(self.current).map(String::as_str)
    }

    pub fn forward(&mut self) -> bool {
        self.select(self.current + 1)
    }

    pub fn back(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(index) => self.select(index),
            None => false,
        }
    }

    /// Highlight section `index`. Out of range is a no-op.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.sections.len() || index == self.current {
            return false;
        }
        self.current = index;
        true
    }

    /// Highlight the section whose label matches `name`, ignoring case.
    pub fn select_named(&mut self, name: &str) -> bool {
        match self
            .sections
            .iter()
            .position(|s| s.eq_ignore_ascii_case(name))
        {
            Some(index) => self.select(index),
            None => false,
        }
    }

    pub fn layout(&self, area: Rect) -> BannerLayout {
        let top = area.y + area.height.saturating_sub(BANNER_HEIGHT) / 2;
        let row = |offset: u16, width: u16| {
            let width = width.min(area.width);
            let x = area.x + (area.width - width) / 2;
            Rect::new(x, top.saturating_add(offset), width, 1).intersection(area)
        };

        let widths: Vec<u16> = self
            .sections
            .iter()
            .map(|s| text_width(s).saturating_add(2))
            .collect();
        let gaps = LINK_GAP * u16::try_from(widths.len().saturating_sub(1)).unwrap_or(0);
        let total = widths.iter().fold(gaps, |acc, w| acc.saturating_add(*w));
        let links_row = row(4, total);
        let mut x = links_row.x;
        let links = widths
            .iter()
            .map(|&w| {
                let rect = Rect::new(x, links_row.y, w, 1).intersection(links_row);
                x = x.saturating_add(w + LINK_GAP);
                rect
            })
            .collect();

        BannerLayout {
            title: row(0, spaced(&self.title).chars().count() as u16),
            tagline: row(2, text_width(&self.tagline)),
            links,
            contact: row(6, text_width(&self.contact).saturating_add(2)),
        }
    }

    /// Section link under a terminal cell.
    pub fn link_at(&self, area: Rect, position: Position) -> Option<usize> {
        self.layout(area)
            .links
            .iter()
            .position(|r| r.contains(position))
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, elapsed: f32, hovered: Option<usize>) {
        let layout = self.layout(area);

        let letters = spaced(&self.title);
        let count = letters.chars().count().max(1) as f32;
        let title: Vec<Span> = letters
            .chars()
            .enumerate()
            .map(|(i, c)| {
                let hue = (elapsed * HUE_SPEED + i as f32 / count * 90.0 + 270.0) % 360.0;
                Span::styled(c.to_string(), Style::new().fg(hsl_to_rgb(hue, 1.0, 0.6)).bold())
            })
            .collect();
        frame.render_widget(Line::from(title), layout.title);
        frame.render_widget(
            Line::from(self.tagline.as_str()).fg(palette::MUTED).italic(),
            layout.tagline,
        );

        for (i, (label, rect)) in self.sections.iter().zip(&layout.links).enumerate() {
            let style = if i == self.current {
                Style::new().fg(palette::BACKDROP).bg(palette::ACCENT).bold()
            } else if hovered == Some(i) {
                Style::new().fg(palette::HOVER).underlined()
            } else {
                Style::new().fg(Color::White)
            };
            frame.render_widget(Line::styled(format!(" {label} "), style), *rect);
        }

        frame.render_widget(
            Line::from(format!("✉ {}", self.contact)).fg(palette::PRIMARY),
            layout.contact,
        );
    }
}

fn text_width(text: &str) -> u16 {
    u16::try_from(Line::from(text).width()).unwrap_or(u16::MAX)
}

/// `NEON` -> `N E O N`.
fn spaced(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for (i, c) in text.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}
