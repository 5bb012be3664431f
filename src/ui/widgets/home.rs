//! Home sections, each drawn with its entrance frame.

use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::reveal::Entrance;
use crate::state::{HomeState, SECTIONS};
use crate::ui::layout::section_slots;
use crate::ui::theme::{colors, fade};

/// Where a section lands for a given entrance frame: scaled around the
/// center, then slid horizontally, kept inside `bounds`.
pub fn place(rect: Rect, bounds: Rect, entrance: Entrance) -> Rect {
    let width = ((f32::from(rect.width) * entrance.scale).round() as u16).min(rect.width);
    let centered = i32::from(rect.x) + i32::from((rect.width - width) / 2);
    let max_x = i32::from(bounds.x + bounds.width.saturating_sub(width));
    let x = (centered + i32::from(entrance.offset_x)).clamp(i32::from(bounds.x), max_x.max(i32::from(bounds.x)));
    Rect { x: x as u16, y: rect.y, width, height: rect.height }
}

pub fn render(f: &mut Frame, home: &HomeState, area: Rect, now: Instant) {
    f.render_widget(Block::default().style(Style::default().bg(colors::BG)), area);

    for slot in section_slots(area, SECTIONS.len(), home.scroll) {
        let Some(rect) = slot.visible else {
            continue;
        };
        let entrance = home.observer.entrance(slot.index, now);
        if entrance.opacity <= 0.0 {
            continue;
        }
        let section = &SECTIONS[slot.index];
        let border = fade(colors::BG, colors::BORDER, entrance.opacity);
        let title = fade(colors::BG, colors::ACCENT_SOFT, entrance.opacity);
        let text = fade(colors::BG, colors::TEXT_DIM, entrance.opacity);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(Line::from(Span::styled(
                format!(" {} ", section.title),
                Style::default().fg(title).add_modifier(Modifier::BOLD),
            )))
            .style(Style::default().bg(colors::BG));
        let para = Paragraph::new(Span::styled(section.body, Style::default().fg(text)))
            .block(block)
            .wrap(Wrap { trim: true })
            .scroll((slot.clipped_top, 0));
        f.render_widget(para, place(rect, area, entrance));
    }
}
