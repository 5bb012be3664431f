//! Chat log: user/assistant messages, typed answers, citations.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::format::{Block as AnswerBlock, Segment};
use crate::state::{ChatLog, ChatState, Message, Sender, PLACEHOLDER_TEXT};
use crate::typewriter::{truncate_inline, UnitProgress};
use crate::ui::theme::{colors, MESSAGE_GAP, PARAGRAPH_INDENT};

const USER_LABEL: &str = "You";
const AGENT_LABEL: &str = "Assistant";
const BULLET: &str = "  • ";
const BULLET_CONT: &str = "    ";

fn label_style(sender: Sender) -> Style {
    match sender {
        Sender::User => Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD),
        Sender::Agent => Style::default().fg(colors::ACCENT_SOFT).add_modifier(Modifier::BOLD),
    }
}

fn segment_style(seg: &Segment) -> Style {
    if seg.bold {
        Style::default().fg(colors::REFERENCE).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors::TEXT)
    }
}

/// Lay out an inline run, breaking on embedded newlines. `first` prefixes
/// the first line, `rest` every following one.
fn inline_lines(inline: &[Segment], first: &'static str, rest: &'static str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = vec![Span::raw(first)];
    for seg in inline {
        let style = segment_style(seg);
        let mut parts = seg.text.split('\n');
        if let Some(head) = parts.next() {
            if !head.is_empty() {
                current.push(Span::styled(head.to_string(), style));
            }
        }
        for part in parts {
            lines.push(Line::from(std::mem::replace(&mut current, vec![Span::raw(rest)])));
            if !part.is_empty() {
                current.push(Span::styled(part.to_string(), style));
            }
        }
    }
    lines.push(Line::from(current));
    lines
}

fn answer_lines(msg: &Message) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut unit = 0;
    for (i, block) in msg.blocks().iter().enumerate() {
        let mut shown_any = false;
        for inline in block.units() {
            let progress = msg.reveal.map_or(UnitProgress::Full, |c| c.progress(unit));
            unit += 1;
            let visible = match progress {
                UnitProgress::Full => inline.clone(),
                UnitProgress::Partial(n) => truncate_inline(inline, n),
                UnitProgress::Hidden => continue,
            };
            let (first, rest) = match block {
                AnswerBlock::Paragraph(_) => (PARAGRAPH_INDENT, ""),
                AnswerBlock::List(_) => (BULLET, BULLET_CONT),
            };
            lines.extend(inline_lines(&visible, first, rest));
            shown_any = true;
        }
        let is_last = i + 1 == msg.blocks().len();
        if shown_any && !is_last && progress_past_block(msg, unit) {
            lines.push(Line::default());
        }
    }
    lines
}

/// True once the typewriter has moved beyond the units before `unit`.
fn progress_past_block(msg: &Message, unit: usize) -> bool {
    msg.reveal.map_or(true, |c| c.progress(unit) != UnitProgress::Hidden)
}

fn message_lines(msg: &Message) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        match msg.sender {
            Sender::User => USER_LABEL,
            Sender::Agent => AGENT_LABEL,
        },
        label_style(msg.sender),
    ))];

    if msg.blocks().is_empty() {
        let style = if msg.text == PLACEHOLDER_TEXT {
            Style::default().fg(colors::MUTED).add_modifier(Modifier::ITALIC)
        } else if msg.text.starts_with('⚠') {
            Style::default().fg(colors::ERROR)
        } else {
            Style::default().fg(colors::TEXT)
        };
        lines.extend(
            msg.text
                .lines()
                .map(|s| Line::from(Span::styled(s.to_string(), style))),
        );
    } else {
        lines.extend(answer_lines(msg));
    }

    if let Some(cite) = msg.citation_line() {
        lines.push(Line::from(Span::styled(
            cite,
            Style::default().fg(colors::TEXT_DIM).add_modifier(Modifier::ITALIC),
        )));
    }
    lines
}

/// Every line of the log, in order.
pub fn log_lines(log: &ChatLog) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, msg) in log.messages().iter().enumerate() {
        if i > 0 {
            lines.extend(std::iter::repeat(Line::default()).take(MESSAGE_GAP));
        }
        lines.extend(message_lines(msg));
    }
    lines
}

fn log_paragraph(lines: Vec<Line<'static>>) -> Paragraph<'static> {
    Paragraph::new(lines)
        .style(Style::default().fg(colors::TEXT).bg(colors::BG))
        .wrap(Wrap { trim: false })
}

/// Terminal rows `lines` occupy when word-wrapped to `width` columns.
pub fn wrapped_rows(lines: &[Line<'static>], width: u16) -> usize {
    log_paragraph(lines.to_vec()).line_count(width.max(1))
}

pub fn render(f: &mut Frame, chat: &ChatState, area: ratatui::prelude::Rect) {
    let mut lines = log_lines(&chat.log);
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Ask a question about the Constitution · Enter to send",
            Style::default().fg(colors::MUTED),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::BORDER))
        .style(Style::default().bg(colors::BG));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let para = log_paragraph(lines);
    let total = para.line_count(inner.width);
    let scroll = chat.offset(total, usize::from(inner.height));
    let para = para.scroll((scroll.min(usize::from(u16::MAX)) as u16, 0));
    f.render_widget(para, inner);
}
