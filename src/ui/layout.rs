//! Screen layouts: chat column with inner margin, Home header + sections.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::theme::{
    HEADER_HEIGHT, INPUT_HEIGHT, MARGIN_X, MIN_CHAT_LINES, SECTION_GAP, SECTION_HEIGHT, STATUS_HEIGHT,
};

#[derive(Clone, Debug)]
pub struct ChatRegions {
    pub chat: Rect,
    pub input: Rect,
    pub status: Rect,
}

pub fn chat(area: Rect) -> ChatRegions {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MIN_CHAT_LINES),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);
    let chat = Rect {
        x: area.x + MARGIN_X,
        y: chunks[0].y,
        width: area.width.saturating_sub(2 * MARGIN_X),
        height: chunks[0].height,
    };
    ChatRegions { chat, input: chunks[1], status: chunks[2] }
}

/// Rows available for text inside the bordered chat box: (width, height).
pub fn chat_inner(area: Rect) -> (u16, u16) {
    let chat = chat(area).chat;
    (chat.width.saturating_sub(2), chat.height.saturating_sub(2))
}

#[derive(Clone, Debug)]
pub struct HomeRegions {
    pub header: Rect,
    pub sections: Rect,
    pub status: Rect,
}

pub fn home(area: Rect) -> HomeRegions {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);
    let sections = Rect {
        x: area.x + MARGIN_X,
        y: chunks[1].y,
        width: area.width.saturating_sub(2 * MARGIN_X),
        height: chunks[1].height,
    };
    HomeRegions { header: chunks[0], sections, status: chunks[2] }
}

/// Placement of one Home section within the scrolled sections area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionSlot {
    pub index: usize,
    /// On-screen part of the section, if any.
    pub visible: Option<Rect>,
    /// Rows of the section hidden above the visible part.
    pub clipped_top: u16,
    pub visible_fraction: f32,
}

fn content_height(count: usize) -> u32 {
    let count = count as u32;
    count * u32::from(SECTION_HEIGHT) + count.saturating_sub(1) * u32::from(SECTION_GAP)
}

pub fn max_home_scroll(area: Rect, count: usize) -> u16 {
    content_height(count)
        .saturating_sub(u32::from(area.height))
        .min(u32::from(u16::MAX)) as u16
}

pub fn section_slots(area: Rect, count: usize, scroll: u16) -> Vec<SectionSlot> {
    let view_top = i64::from(scroll);
    let view_bottom = view_top + i64::from(area.height);
    (0..count)
        .map(|index| {
            let top = index as i64 * i64::from(SECTION_HEIGHT + SECTION_GAP);
            let bottom = top + i64::from(SECTION_HEIGHT);
            let vis_top = top.max(view_top);
            let vis_bottom = bottom.min(view_bottom);
            let rows = (vis_bottom - vis_top).max(0);
            let visible = (rows > 0).then(|| Rect {
                x: area.x,
                y: area.y + (vis_top - view_top) as u16,
                width: area.width,
                height: rows as u16,
            });
            SectionSlot {
                index,
                visible,
                clipped_top: (vis_top - top).max(0) as u16,
                visible_fraction: rows as f32 / f32::from(SECTION_HEIGHT),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_visibility_follows_scroll() {
        // room for the first section and one row of the second
        let area = Rect::new(0, 0, 40, SECTION_HEIGHT + SECTION_GAP + 1);
        let slots = section_slots(area, 3, 0);
        assert_eq!(slots[0].visible_fraction, 1.0);
        assert!((slots[1].visible_fraction - 1.0 / f32::from(SECTION_HEIGHT)).abs() < 1e-6);
        assert_eq!(slots[2].visible, None);
        assert_eq!(slots[2].visible_fraction, 0.0);

        let slots = section_slots(area, 3, SECTION_HEIGHT + SECTION_GAP);
        assert_eq!(slots[0].visible, None);
        assert_eq!(slots[1].visible.map(|r| r.y), Some(0));
        assert_eq!(slots[1].visible_fraction, 1.0);
    }

    #[test]
    fn test_partially_scrolled_section_is_clipped() {
        let area = Rect::new(0, 2, 40, 20);
        let slots = section_slots(area, 2, 2);
        assert_eq!(slots[0].clipped_top, 2);
        assert_eq!(slots[0].visible, Some(Rect::new(0, 2, 40, SECTION_HEIGHT - 2)));
    }

    #[test]
    fn test_max_scroll() {
        let area = Rect::new(0, 0, 40, 4);
        let total = 3 * SECTION_HEIGHT + 2 * SECTION_GAP;
        assert_eq!(max_home_scroll(area, 3), total - 4);
        assert_eq!(max_home_scroll(Rect::new(0, 0, 40, 100), 3), 0);
    }
}
