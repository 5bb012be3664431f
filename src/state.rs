//! App state: screens, chat log, input line, home sections.

use crate::format::Block;
use crate::reveal::SectionObserver;
use crate::typewriter::RevealCursor;

pub const PLACEHOLDER_TEXT: &str = "⏳ Generating response...";
pub const NO_ANSWER_TEXT: &str = "⚠️ No answer generated.";
pub const CONNECTION_ERROR_TEXT: &str = "⚠️ Error connecting to the server.";
pub const CITATION_PREFIX: &str = "📖 Cited: ";

/// The two mutually exclusive screens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Home,
    Chat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Agent,
}

/// Stable handle to a message in the chat log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Body {
    Plain,
    Formatted(Vec<Block>),
}

#[derive(Clone, Debug)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
    pub citation: Option<String>,
    pub body: Body,
    /// Set while the typewriter is still revealing this message.
    pub reveal: Option<RevealCursor>,
}

impl Message {
    pub fn blocks(&self) -> &[Block] {
        match &self.body {
            Body::Formatted(blocks) => blocks,
            Body::Plain => &[],
        }
    }

    /// Citation line, only once the body is fully shown.
    pub fn citation_line(&self) -> Option<String> {
        if self.reveal.is_some() {
            return None;
        }
        self.citation.as_ref().map(|c| format!("{CITATION_PREFIX}{c}"))
    }
}

/// Append-only message log. The generating placeholder is the only entry
/// that is ever removed.
#[derive(Clone, Debug, Default)]
pub struct ChatLog {
    messages: Vec<Message>,
    next_id: u64,
}

impl ChatLog {
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn push_plain(&mut self, sender: Sender, text: impl Into<String>) -> MessageId {
        self.push(sender, text.into(), None, Body::Plain, None)
    }

    /// Append an agent answer that will be typed out.
    pub fn push_typed(&mut self, text: String, blocks: Vec<Block>, citation: Option<String>) -> MessageId {
        let reveal = Some(RevealCursor::new());
        self.push(Sender::Agent, text, citation, Body::Formatted(blocks), reveal)
    }

    fn push(
        &mut self,
        sender: Sender,
        text: String,
        citation: Option<String>,
        body: Body,
        reveal: Option<RevealCursor>,
    ) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(Message { id, sender, text, citation, body, reveal });
        id
    }

    #[cfg(test)]
    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn get_mut(&mut self, id: MessageId) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.id == id)
    }

    pub fn remove(&mut self, id: MessageId) -> Option<Message> {
        let pos = self.messages.iter().position(|m| m.id == id)?;
        Some(self.messages.remove(pos))
    }
}

/// Chat: log + scroll position.
#[derive(Clone, Debug)]
pub struct ChatState {
    pub log: ChatLog,
    /// First visible row when not following the tail.
    pub scroll: usize,
    /// Keep the newest row in view.
    pub follow: bool,
}

impl Default for ChatState {
    fn default() -> Self {
        Self { log: ChatLog::default(), scroll: 0, follow: true }
    }
}

impl ChatState {
    pub fn scroll_to_bottom(&mut self) {
        self.follow = true;
    }

    pub fn scroll_up(&mut self, rows: usize, total_rows: usize, viewport: usize) {
        if self.follow {
            self.scroll = total_rows.saturating_sub(viewport);
            self.follow = false;
        }
        self.scroll = self.scroll.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: usize, total_rows: usize, viewport: usize) {
        if self.follow {
            return;
        }
        let bottom = total_rows.saturating_sub(viewport);
        self.scroll = (self.scroll + rows).min(bottom);
        if self.scroll >= bottom {
            self.follow = true;
        }
    }

    /// First row to draw for a log of `total_rows` in a `viewport` of rows.
    pub fn offset(&self, total_rows: usize, viewport: usize) -> usize {
        let bottom = total_rows.saturating_sub(viewport);
        if self.follow {
            bottom
        } else {
            self.scroll.min(bottom)
        }
    }
}

/// A section of the Home screen.
#[derive(Clone, Copy, Debug)]
pub struct Section {
    pub title: &'static str,
    pub body: &'static str,
}

pub const SECTIONS: &[Section] = &[
    Section {
        title: "For citizens",
        body: "Ask what the Constitution says about your rights, in plain language, with the section it comes from.",
    },
    Section {
        title: "For students",
        body: "Explore how chapters, articles and sections fit together while you study constitutional law.",
    },
    Section {
        title: "For legal professionals",
        body: "Get answers phrased in legal terminology, with the relevant sections cited for quick verification.",
    },
    Section {
        title: "For researchers",
        body: "Compare provisions across the text and follow references from one section to the next.",
    },
    Section {
        title: "How it works",
        body: "Your question is matched against the constitutional text and answered strictly from the retrieved sections.",
    },
];

#[derive(Clone, Debug)]
pub struct HomeState {
    pub scroll: u16,
    pub observer: SectionObserver,
}

impl Default for HomeState {
    fn default() -> Self {
        Self { scroll: 0, observer: SectionObserver::new(SECTIONS.len()) }
    }
}

/// Global app state.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub screen: Screen,
    pub home: HomeState,
    pub chat: ChatState,
    pub input_buffer: String,
    /// Byte offset into `input_buffer`.
    pub input_cursor: usize,
    pub history: Vec<String>,
    pub history_index: usize,
    /// A request is in flight.
    pub loading: bool,
    /// Message currently being typed out.
    pub revealing: Option<MessageId>,
}

impl AppState {
    pub fn input_buffer(&self) -> &str {
        self.input_buffer.as_str()
    }

    pub fn input_cursor(&self) -> usize {
        self.input_cursor
    }

    /// Submissions wait until the previous answer is fully shown.
    pub fn busy(&self) -> bool {
        self.loading || self.revealing.is_some()
    }

    /// Make `screen` the active one; the other is deactivated.
    pub fn activate(&mut self, screen: Screen) {
        self.screen = screen;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_answer;

    #[test]
    fn test_toggle_leaves_one_screen_active() {
        let mut state = AppState::default();
        assert_eq!(state.screen, Screen::Home);
        for screen in [Screen::Chat, Screen::Chat, Screen::Home, Screen::Home, Screen::Chat] {
            state.activate(screen);
            assert_eq!(state.screen, screen);
        }
    }

    #[test]
    fn test_log_ids_survive_removal() {
        let mut log = ChatLog::default();
        let a = log.push_plain(Sender::User, "hi");
        let b = log.push_plain(Sender::Agent, PLACEHOLDER_TEXT);
        assert_eq!(log.len(), 2);
        assert_eq!(log.remove(b).map(|m| m.text), Some(PLACEHOLDER_TEXT.to_string()));
        assert!(log.remove(b).is_none());
        let c = log.push_plain(Sender::Agent, "done");
        assert_ne!(b, c);
        assert_eq!(log.get(a).map(|m| m.sender), Some(Sender::User));
    }

    #[test]
    fn test_citation_shown_after_reveal() {
        let mut log = ChatLog::default();
        let id = log.push_typed("Hello".into(), format_answer("Hello"), Some("Doc A".into()));
        assert_eq!(log.get(id).and_then(Message::citation_line), None);
        if let Some(msg) = log.get_mut(id) {
            msg.reveal = None;
        }
        assert_eq!(
            log.get(id).and_then(Message::citation_line).as_deref(),
            Some("📖 Cited: Doc A")
        );
    }

    #[test]
    fn test_scroll_detaches_and_reattaches() {
        let mut chat = ChatState::default();
        assert_eq!(chat.offset(50, 10), 40);
        chat.scroll_up(5, 50, 10);
        assert!(!chat.follow);
        assert_eq!(chat.offset(60, 10), 35);
        chat.scroll_down(100, 60, 10);
        assert!(chat.follow);
        assert_eq!(chat.offset(60, 10), 50);
    }

    #[test]
    fn test_busy_while_loading_or_revealing() {
        let mut state = AppState::default();
        assert!(!state.busy());
        state.loading = true;
        assert!(state.busy());
        state.loading = false;
        state.revealing = Some(state.chat.log.push_plain(Sender::Agent, "x"));
        assert!(state.busy());
    }
}
