//! Theme: dark canvas, bright body text, accent labels.

use ratatui::style::Color;

pub mod colors {
    use super::*;
    /// Main canvas (chat area).
    pub const BG: Color = Color::Rgb(0x18, 0x1c, 0x22);
    /// Input bar, status, header.
    pub const ELEVATED: Color = Color::Rgb(0x16, 0x1a, 0x1f);
    pub const BORDER: Color = Color::Rgb(0x2d, 0x34, 0x3e);
    /// Prompt, You label.
    pub const ACCENT: Color = Color::Rgb(0x6b, 0xbc, 0xff);
    /// Assistant label, section titles.
    pub const ACCENT_SOFT: Color = Color::Rgb(0x99, 0xd4, 0xff);
    /// Bold Article/Section references.
    pub const REFERENCE: Color = Color::Rgb(0xff, 0xd1, 0x80);
    pub const TEXT: Color = Color::Rgb(0xf2, 0xf4, 0xf8);
    pub const TEXT_DIM: Color = Color::Rgb(0xbc, 0xc5, 0xd0);
    pub const MUTED: Color = Color::Rgb(0x94, 0x9e, 0xad);
    pub const ERROR: Color = Color::Rgb(0xf0, 0x6c, 0x6c);
}

pub mod styles {
    use ratatui::style::{Modifier, Style};

    use super::colors;

    pub fn border() -> Style {
        Style::default().fg(colors::BORDER)
    }

    pub fn accent_bold() -> Style {
        Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn title_bold() -> Style {
        Style::default().fg(colors::ACCENT_SOFT).add_modifier(Modifier::BOLD)
    }

    pub fn text_dim() -> Style {
        Style::default().fg(colors::TEXT_DIM)
    }

    pub fn muted() -> Style {
        Style::default().fg(colors::MUTED)
    }

    pub fn elevated_bg() -> Style {
        Style::default().bg(colors::ELEVATED)
    }
}

pub const HEADER_HEIGHT: u16 = 5;
pub const STATUS_HEIGHT: u16 = 1;
pub const INPUT_HEIGHT: u16 = 2;
pub const MIN_CHAT_LINES: u16 = 3;
/// Blank line between messages.
pub const MESSAGE_GAP: usize = 1;
/// Inner horizontal margin (chars each side).
pub const MARGIN_X: u16 = 1;
/// First-line indent of answer paragraphs.
pub const PARAGRAPH_INDENT: &str = "    ";
/// Rows per Home section, borders included.
pub const SECTION_HEIGHT: u16 = 5;
pub const SECTION_GAP: u16 = 1;
pub const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Blend `from` towards `to` by `t` in 0..=1. Non-RGB colors snap at the midpoint.
pub fn fade(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if t < 0.5 => from,
        _ => to,
    }
}
