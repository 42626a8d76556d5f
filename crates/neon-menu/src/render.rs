//! Drawing the popup and its submenu.

use neon_core::{mix, palette};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph},
};

use crate::entry::{MenuAction, MenuEntry};
use crate::menu::ContextMenu;

impl<A: Clone> ContextMenu<A> {
    pub fn render(&self, frame: &mut Frame) {
        if !self.is_visible() {
            return;
        }
        let border = mix(palette::PRIMARY, Color::Rgb(255, 255, 255), self.flash());
        let rect = self.rect();
        let width = rect.width.saturating_sub(2);
        let lines = self
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| entry_line(entry, width, self.hovered() == Some(i)))
            .collect();
        draw_popup(frame, rect, lines, border);

        if let (Some(sub), Some(items)) = (self.submenu_rect(), self.open_items()) {
            let width = sub.width.saturating_sub(2);
            let lines = items
                .iter()
                .enumerate()
                .map(|(i, action)| {
                    action_line(action, "", width, self.sub_hovered() == Some(i))
                })
                .collect();
            draw_popup(frame, sub, lines, border);
        }
    }
}

fn draw_popup(frame: &mut Frame, rect: Rect, lines: Vec<Line<'_>>, border: Color) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(border))
        .style(Style::new().bg(palette::BACKDROP));
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

fn entry_line<A>(entry: &MenuEntry<A>, width: u16, hovered: bool) -> Line<'_> {
    match entry {
        MenuEntry::Action(action) => {
            let hint = action.shortcut.as_deref().unwrap_or_default();
            action_line(action, hint, width, hovered)
        }
        MenuEntry::Separator => {
            Line::from("─".repeat(usize::from(width))).fg(palette::MUTED)
        }
        MenuEntry::Header(label) => Line::from(format!(" {label}"))
            .fg(palette::MUTED)
            .bold(),
        MenuEntry::Submenu { icon, label, .. } => {
            row_line(icon, label, "▸", width, hovered)
        }
    }
}

fn action_line<'a, A>(
    action: &'a MenuAction<A>,
    hint: &'a str,
    width: u16,
    hovered: bool,
) -> Line<'a> {
    row_line(&action.icon, &action.label, hint, width, hovered)
}

/// ` icon label ... hint ` padded to `width`.
fn row_line<'a>(icon: &'a str, label: &'a str, hint: &'a str, width: u16, hovered: bool) -> Line<'a> {
    let left = if icon.is_empty() {
        format!(" {label}")
    } else {
        format!(" {icon} {label}")
    };
    let used = Span::raw(left.as_str()).width() + Span::raw(hint).width() + 1;
    let gap = usize::from(width).saturating_sub(used);

    let (fg, bg) = if hovered {
        (palette::HOVER, mix(palette::BACKDROP, palette::PRIMARY, 0.5))
    } else {
        (Color::White, palette::BACKDROP)
    };
    Line::from(vec![
        Span::styled(left, Style::new().fg(fg)),
        Span::raw(" ".repeat(gap)),
        Span::styled(hint, Style::new().fg(palette::MUTED)),
        Span::raw(" "),
    ])
    .bg(bg)
}
