//! Typewriter reveal: one character at a time, one unit (paragraph or list
//! item) after another.
//!
//! The cursor does not own the text; it is advanced against the blocks of the
//! message it belongs to and read back by the chat widget.

use crate::format::{Block, Inline, Segment};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevealCursor {
    /// Index into the flattened units of all blocks.
    unit: usize,
    /// Characters shown of the current unit.
    chars: usize,
}

/// How much of one unit is visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitProgress {
    Full,
    Partial(usize),
    Hidden,
}

impl RevealCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reveal up to `n` more characters. Returns how many were revealed.
    pub fn advance(&mut self, blocks: &[Block], n: usize) -> usize {
        let lengths = unit_lengths(blocks);
        let mut left = n;
        while left > 0 {
            let Some(&len) = lengths.get(self.unit) else {
                break;
            };
            let remaining = len - self.chars;
            if remaining == 0 {
                self.unit += 1;
                self.chars = 0;
                continue;
            }
            let step = remaining.min(left);
            self.chars += step;
            left -= step;
        }
        // step past fully typed units so completion is observable
        while let Some(&len) = lengths.get(self.unit) {
            if self.chars < len {
                break;
            }
            self.unit += 1;
            self.chars = 0;
        }
        n - left
    }

    pub fn is_complete(&self, blocks: &[Block]) -> bool {
        self.unit >= unit_lengths(blocks).len()
    }

    /// Progress of the unit at flattened position `unit`.
    pub fn progress(&self, unit: usize) -> UnitProgress {
        if unit < self.unit {
            UnitProgress::Full
        } else if unit == self.unit {
            UnitProgress::Partial(self.chars)
        } else {
            UnitProgress::Hidden
        }
    }
}

fn unit_lengths(blocks: &[Block]) -> Vec<usize> {
    blocks
        .iter()
        .flat_map(|b| b.units())
        .map(|inline| inline.iter().map(|s| s.text.chars().count()).sum())
        .collect()
}

/// The first `chars` characters of `inline`, keeping segment styles.
pub fn truncate_inline(inline: &[Segment], chars: usize) -> Inline {
    let mut out = Vec::new();
    let mut left = chars;
    for seg in inline {
        if left == 0 {
            break;
        }
        let count = seg.text.chars().count();
        if count <= left {
            out.push(seg.clone());
            left -= count;
        } else {
            let text: String = seg.text.chars().take(left).collect();
            out.push(Segment { text, bold: seg.bold });
            left = 0;
        }
    }
    out
}
