//! Answer formatter: paragraphs, Article/Section references, bullet lists.

use std::sync::OnceLock;

use regex::Regex;

/// A run of answer text, bold when it is a highlighted reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub bold: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self { text: text.to_string(), bold: false }
    }

    fn bold(text: &str) -> Self {
        Self { text: text.to_string(), bold: true }
    }
}

/// Styled text making up one paragraph or one list item.
pub type Inline = Vec<Segment>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// Indented paragraph with every reference bolded.
    Paragraph(Inline),
    /// One item per reference; each item repeats the whole paragraph.
    List(Vec<Inline>),
}

impl Block {
    /// Units revealed one after another by the typewriter.
    pub fn units(&self) -> &[Inline] {
        match self {
            Block::Paragraph(inline) => std::slice::from_ref(inline),
            Block::List(items) => items,
        }
    }
}

fn paragraph_break() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{2,}").expect("paragraph pattern"))
}

fn reference() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(Article|Section)\s*\d+").expect("reference pattern"))
}

/// Split `text` into renderable blocks.
pub fn format_answer(text: &str) -> Vec<Block> {
    paragraph_break()
        .split(text)
        .filter(|para| !para.trim().is_empty())
        .map(format_paragraph)
        .collect()
}

fn format_paragraph(para: &str) -> Block {
    let matches: Vec<(usize, usize)> = reference()
        .find_iter(para)
        .map(|m| (m.start(), m.end()))
        .collect();

    if matches.len() > 1 {
        let items = matches
            .iter()
            .map(|&range| emphasize(para, std::slice::from_ref(&range)))
            .collect();
        Block::List(items)
    } else {
        Block::Paragraph(emphasize(para, &matches))
    }
}

/// Bold the given byte ranges of `para`; ranges are sorted and disjoint.
fn emphasize(para: &str, ranges: &[(usize, usize)]) -> Inline {
    let mut out = Vec::with_capacity(ranges.len() * 2 + 1);
    let mut pos = 0;
    for &(start, end) in ranges {
        if start > pos {
            out.push(Segment::plain(&para[pos..start]));
        }
        out.push(Segment::bold(&para[start..end]));
        pos = end;
    }
    if pos < para.len() || out.is_empty() {
        out.push(Segment::plain(&para[pos..]));
    }
    out
}

/// Plain text of an inline run.
pub fn inline_text(inline: &[Segment]) -> String {
    inline.iter().map(|s| s.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bolded(inline: &[Segment]) -> Vec<&str> {
        inline.iter().filter(|s| s.bold).map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_single_reference_is_bold_paragraph() {
        let blocks = format_answer("See Section 3 for details.");
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Paragraph(inline) => {
                assert_eq!(inline_text(inline), "See Section 3 for details.");
                assert_eq!(bolded(inline), vec!["Section 3"]);
            }
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn test_two_references_become_list() {
        let para = "Article 1 and Article 2 both apply.";
        let blocks = format_answer(para);
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::List(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(inline_text(&items[0]), para);
                assert_eq!(inline_text(&items[1]), para);
                assert_eq!(bolded(&items[0]), vec!["Article 1"]);
                assert_eq!(bolded(&items[1]), vec!["Article 2"]);
                // the first item bolds the leading reference
                assert!(items[0][0].bold);
                assert!(!items[1][0].bold);
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_repeated_reference_bolds_each_occurrence() {
        let blocks = format_answer("Section 9, then again Section 9.");
        let Block::List(items) = &blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0][0], Segment::bold("Section 9"));
        assert_eq!(items[1].last(), Some(&Segment::plain(".")));
        assert_eq!(items[1][1], Segment::bold("Section 9"));
    }

    #[test]
    fn test_matching_is_case_insensitive_and_spacing_optional() {
        let blocks = format_answer("under SECTION12 of the act");
        let Block::Paragraph(inline) = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(bolded(inline), vec!["SECTION12"]);

        let blocks = format_answer("article 4");
        let Block::Paragraph(inline) = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(inline, &vec![Segment::bold("article 4")]);
    }

    #[test]
    fn test_splits_on_blank_lines_only() {
        let blocks = format_answer("first line\nstill first\n\nsecond\n\n\n\nthird");
        assert_eq!(blocks.len(), 3);
        let Block::Paragraph(first) = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(inline_text(first), "first line\nstill first");
    }

    #[test]
    fn test_plain_paragraph_has_no_bold() {
        let blocks = format_answer("No references here.");
        let Block::Paragraph(inline) = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert!(bolded(inline).is_empty());
        assert_eq!(blocks[0].units().len(), 1);
    }

    #[test]
    fn test_blank_input_yields_no_blocks() {
        assert!(format_answer("").is_empty());
        assert!(format_answer("\n\n  \n\n").is_empty());
    }
}
