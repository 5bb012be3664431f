//! Home banner: title, version and tagline in a rounded box.

use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::styles;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const TITLE: &str = "Constitution Assistant ";
const START_HINT: &str = " Enter ▸ start ";
const TAGLINE: &str = "Ask legal questions, get answers with cited sections.";

/// Truncate to `max_chars` with a trailing ellipsis.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{keep}…")
}

pub fn render(f: &mut Frame, area: ratatui::prelude::Rect) {
    // Total width available, minus 2 for leading "  " indent.
    let total = (area.width as usize).saturating_sub(2);
    // Dashes between the corners.
    let dash_count = total.saturating_sub(2);
    // Content width between "│ " and " │".
    let inner = total.saturating_sub(4);

    let top_line = format!("╭{}╮", "─".repeat(dash_count));
    let bottom_line = format!("╰{}╯", "─".repeat(dash_count));

    let version = format!("(v{VERSION})");
    let title_len = "⚖ ".chars().count() + TITLE.chars().count() + version.chars().count() + 1;
    let pad = inner.saturating_sub(title_len + START_HINT.chars().count());

    let tagline = truncate(TAGLINE, inner);
    let tag_pad = inner.saturating_sub(tagline.chars().count());

    let border = styles::border();
    let lines = vec![
        Line::from(vec![Span::styled("  ", border), Span::styled(top_line, border)]),
        Line::from(vec![
            Span::styled("  │ ", border),
            Span::styled("⚖ ", styles::accent_bold()),
            Span::styled(TITLE, styles::title_bold()),
            Span::styled(version, styles::text_dim()),
            Span::styled(" ".repeat(pad), Style::default()),
            Span::styled(START_HINT, styles::muted()),
            Span::styled("│", border),
        ]),
        Line::from(vec![
            Span::styled("  │", border),
            Span::styled(" ".repeat(dash_count.saturating_sub(1)), Style::default()),
            Span::styled("│", border),
        ]),
        Line::from(vec![
            Span::styled("  │ ", border),
            Span::styled(tagline, styles::text_dim()),
            Span::styled(" ".repeat(tag_pad), Style::default()),
            Span::styled("│", border),
        ]),
        Line::from(vec![Span::styled("  ", border), Span::styled(bottom_line, border)]),
    ];

    f.render_widget(Paragraph::new(lines).style(styles::elevated_bg()), area);
}
