//! Input bar: prompt and cursor.

use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Paragraph},
    Frame,
};

use crate::ui::theme::colors;

const PROMPT: &str = " ▸ ";

pub fn render(
    f: &mut Frame,
    buffer: &str,
    cursor_pos: usize,
    busy: bool,
    area: Rect,
) {
    let text_style = if busy {
        Style::default().fg(colors::MUTED)
    } else {
        Style::default().fg(colors::TEXT)
    };
    let line = ratatui::text::Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD)),
        Span::styled(buffer, text_style),
    ]);
    let block = Block::default()
        .style(Style::default().bg(colors::ELEVATED))
        .borders(ratatui::widgets::Borders::TOP)
        .border_style(Style::default().fg(colors::BORDER))
        .border_type(ratatui::widgets::BorderType::Plain);
    let inner = block.inner(area);
    f.render_widget(block, area);
    let para = Paragraph::new(line);
    f.render_widget(para, inner);

    f.set_cursor_position(Position { x: cursor_x(inner, buffer, cursor_pos), y: inner.y });
}

/// Column of the cursor, pinned to the last cell of `inner` for long input.
fn cursor_x(inner: Rect, buffer: &str, cursor_pos: usize) -> u16 {
    let prompt_width = PROMPT.chars().count();
    let typed = buffer.get(..cursor_pos).map_or(0, |s| s.chars().count());
    let offset = u16::try_from(prompt_width.saturating_add(typed)).unwrap_or(u16::MAX);
    let last = inner.x.saturating_add(inner.width.saturating_sub(1));
    inner.x.saturating_add(offset).min(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_follows_typed_chars() {
        let inner = Rect::new(2, 5, 40, 1);
        assert_eq!(cursor_x(inner, "añb", 3), 2 + 3 + 2);
    }

    #[test]
    fn test_cursor_stays_inside_for_long_input() {
        let inner = Rect { x: 65_000, y: 0, width: 500, height: 1 };
        let buffer = "x".repeat(100_000);
        assert_eq!(cursor_x(inner, &buffer, buffer.len()), 65_499);
    }
}
