//! Status bar: activity on the left, key hints on the right.

use ratatui::{style::Style, text::Span, widgets::Paragraph, Frame};

use crate::state::Screen;
use crate::ui::theme::colors;

pub fn render(
    f: &mut Frame,
    area: ratatui::prelude::Rect,
    screen: Screen,
    loading: bool,
    revealing: bool,
    spinner_char: char,
) {
    let left = match screen {
        Screen::Home => " Welcome".to_string(),
        Screen::Chat if loading => format!(" {} Generating…", spinner_char),
        Screen::Chat if revealing => " Typing…".to_string(),
        Screen::Chat => " Ready".to_string(),
    };
    let right = match screen {
        Screen::Home => " Enter start chat  j/k scroll  q quit ",
        Screen::Chat => " Enter send  ↑↓ history  PgUp/PgDn scroll  Esc back ",
    };
    let width = area.width as usize;
    let left_len = left.chars().count();
    let right_len = right.chars().count();
    let pad = width.saturating_sub(left_len + right_len);
    let line = format!("{}{}{}", left, " ".repeat(pad), right);
    let span = Span::styled(line, Style::default().fg(colors::MUTED).bg(colors::ELEVATED));
    f.render_widget(Paragraph::new(span), area);
}
