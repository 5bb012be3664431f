//! Global state container and action dispatch.
//!
//! `App` is the only writer of the chat log. Submissions go out through the
//! worker channel, replies come back through [`App::poll_results`], and the
//! typewriter is driven by [`App::advance_reveal`] from the event loop.

use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::{debug, info, warn};

use crate::actions::Action;
use crate::backend::{AskResult, WorkerHandle};
use crate::error::AskError;
use crate::events::{FRAME_RATE, TICK_RATE};
use crate::format::format_answer;
use crate::state::{
    AppState, MessageId, Screen, Sender, CONNECTION_ERROR_TEXT, NO_ANSWER_TEXT, PLACEHOLDER_TEXT, SECTIONS,
};
use crate::ui::layout;
use crate::ui::widgets::chat;

const PAGE_ROWS: usize = 10;

pub struct App {
    pub state: AppState,
    requests: mpsc::UnboundedSender<String>,
    responses: mpsc::UnboundedReceiver<AskResult>,
    /// The "generating" placeholder while a request is in flight.
    pending: Option<MessageId>,
    char_delay: Duration,
    /// When the typewriter last revealed a character.
    last_step: Option<Instant>,
    /// Full terminal area of the last frame.
    viewport: Rect,
    pub should_quit: bool,
    /// For spinner animation (incremented each tick).
    pub tick: usize,
}

impl App {
    pub fn new(worker: WorkerHandle, char_delay: Duration) -> Self {
        Self {
            state: AppState::default(),
            requests: worker.requests,
            responses: worker.responses,
            pending: None,
            char_delay,
            last_step: None,
            viewport: Rect::default(),
            should_quit: false,
            tick: 0,
        }
    }

    pub fn set_viewport(&mut self, area: Rect) {
        self.viewport = area;
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,

            Action::StartChat => self.state.activate(Screen::Chat),
            Action::BackHome => self.state.activate(Screen::Home),
            Action::HomeScrollUp => self.state.home.scroll = self.state.home.scroll.saturating_sub(1),
            Action::HomeScrollDown => {
                let max = layout::max_home_scroll(layout::home(self.viewport).sections, SECTIONS.len());
                self.state.home.scroll = (self.state.home.scroll + 1).min(max);
            }

            Action::Char(c) => {
                let pos = self.state.input_cursor.min(self.state.input_buffer.len());
                self.state.input_buffer.insert(pos, c);
                self.state.input_cursor = pos + c.len_utf8();
            }
            Action::Backspace => {
                let pos = self.state.input_cursor;
                if pos > 0 {
                    let prev = prev_boundary(&self.state.input_buffer, pos);
                    self.state.input_buffer.replace_range(prev..pos, "");
                    self.state.input_cursor = prev;
                }
            }
            Action::Delete => {
                let pos = self.state.input_cursor;
                let next = next_boundary(&self.state.input_buffer, pos);
                if next > pos {
                    self.state.input_buffer.replace_range(pos..next, "");
                }
            }
            Action::CursorLeft => {
                self.state.input_cursor = prev_boundary(&self.state.input_buffer, self.state.input_cursor);
            }
            Action::CursorRight => {
                self.state.input_cursor = next_boundary(&self.state.input_buffer, self.state.input_cursor);
            }
            Action::CursorHome => self.state.input_cursor = 0,
            Action::CursorEnd => self.state.input_cursor = self.state.input_buffer.len(),
            Action::ClearInput => {
                self.state.input_buffer.clear();
                self.state.input_cursor = 0;
            }
            Action::Submit => self.submit_input(),

            Action::ChatScrollUp => self.scroll_chat_up(1),
            Action::ChatScrollDown => self.scroll_chat_down(1),
            Action::ChatScrollPageUp => self.scroll_chat_up(PAGE_ROWS),
            Action::ChatScrollPageDown => self.scroll_chat_down(PAGE_ROWS),
            Action::ChatScrollBottom => self.state.chat.scroll_to_bottom(),

            Action::HistoryUp => self.history_up(),
            Action::HistoryDown => self.history_down(),
        }
    }

    fn submit_input(&mut self) {
        let query = self.state.input_buffer.trim().to_string();
        if query.is_empty() {
            return;
        }
        if self.state.busy() {
            debug!("submission ignored while an answer is pending");
            return;
        }

        self.state.input_buffer.clear();
        self.state.input_cursor = 0;
        if self.state.history.last() != Some(&query) {
            self.state.history.push(query.clone());
        }
        self.state.history_index = self.state.history.len();

        let log = &mut self.state.chat.log;
        log.push_plain(Sender::User, query.clone());
        self.pending = Some(log.push_plain(Sender::Agent, PLACEHOLDER_TEXT));
        self.state.chat.scroll_to_bottom();

        info!(chars = query.chars().count(), "submitting query");
        if self.requests.send(query).is_err() {
            self.show_failure(AskError::WorkerStopped);
            return;
        }
        self.state.loading = true;
    }

    /// Drain finished requests from the worker.
    pub fn poll_results(&mut self, now: Instant) {
        loop {
            match self.responses.try_recv() {
                Ok(result) => self.handle_result(result, now),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.state.loading {
                        self.show_failure(AskError::WorkerStopped);
                    }
                    break;
                }
            }
        }
    }

    fn handle_result(&mut self, result: AskResult, now: Instant) {
        match result {
            Ok(resp) => {
                self.state.loading = false;
                self.remove_placeholder();
                let text = resp.answer.unwrap_or_else(|| NO_ANSWER_TEXT.to_string());
                let blocks = format_answer(&text);
                let id = self.state.chat.log.push_typed(text, blocks, resp.citation);
                self.state.revealing = Some(id);
                self.last_step = Some(now);
                self.state.chat.scroll_to_bottom();
                self.advance_reveal(now);
            }
            Err(e) => self.show_failure(e),
        }
    }

    fn show_failure(&mut self, error: AskError) {
        warn!(error = %error, "showing connection error");
        self.state.loading = false;
        self.remove_placeholder();
        self.state.chat.log.push_plain(Sender::Agent, CONNECTION_ERROR_TEXT);
        self.state.chat.scroll_to_bottom();
    }

    fn remove_placeholder(&mut self) {
        if let Some(id) = self.pending.take() {
            self.state.chat.log.remove(id);
        }
    }

    /// Reveal every character that is due by `now`, then pin the log to the bottom.
    pub fn advance_reveal(&mut self, now: Instant) {
        let Some(id) = self.state.revealing else {
            return;
        };
        let last = self.last_step.unwrap_or(now);
        let due = if self.char_delay.is_zero() {
            usize::MAX
        } else {
            let elapsed = now.saturating_duration_since(last);
            usize::try_from(elapsed.as_nanos() / self.char_delay.as_nanos()).unwrap_or(usize::MAX)
        };
        if due == 0 {
            return;
        }

        let Some(msg) = self.state.chat.log.get_mut(id) else {
            self.state.revealing = None;
            return;
        };
        let mut cursor = msg.reveal.unwrap_or_default();
        cursor.advance(msg.blocks(), due);
        if cursor.is_complete(msg.blocks()) {
            msg.reveal = None;
            self.state.revealing = None;
            self.last_step = None;
            debug!("answer fully revealed");
        } else {
            msg.reveal = Some(cursor);
            let delay = self.char_delay.as_nanos();
            let carry = now.saturating_duration_since(last).as_nanos() % delay;
            let carry = Duration::from_nanos(u64::try_from(carry).unwrap_or(0));
            self.last_step = Some(now.checked_sub(carry).unwrap_or(now));
        }
        self.state.chat.scroll_to_bottom();
    }

    /// Start entrance animations for Home sections that scrolled into view.
    pub fn observe_sections(&mut self, now: Instant) {
        if self.state.screen != Screen::Home {
            return;
        }
        let area = layout::home(self.viewport).sections;
        for slot in layout::section_slots(area, SECTIONS.len(), self.state.home.scroll) {
            if self.state.home.observer.observe(slot.index, slot.visible_fraction, now) {
                debug!(section = slot.index, "section entrance started");
            }
        }
    }

    /// How long the event loop may block before the next frame is due.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        if self.state.revealing.is_some() {
            return self.char_delay.clamp(Duration::from_millis(1), TICK_RATE);
        }
        if self.state.screen == Screen::Home && self.state.home.observer.animating(now) {
            return FRAME_RATE;
        }
        TICK_RATE
    }

    fn chat_rows(&self) -> (usize, usize) {
        let (width, height) = layout::chat_inner(self.viewport);
        let lines = chat::log_lines(&self.state.chat.log);
        (chat::wrapped_rows(&lines, width), usize::from(height))
    }

    fn scroll_chat_up(&mut self, rows: usize) {
        let (total, viewport) = self.chat_rows();
        self.state.chat.scroll_up(rows, total, viewport);
    }

    fn scroll_chat_down(&mut self, rows: usize) {
        let (total, viewport) = self.chat_rows();
        self.state.chat.scroll_down(rows, total, viewport);
    }

    fn history_up(&mut self) {
        if !self.state.history.is_empty() && self.state.history_index > 0 {
            self.state.history_index -= 1;
            self.state.input_buffer = self.state.history[self.state.history_index].clone();
            self.state.input_cursor = self.state.input_buffer.len();
        }
    }

    fn history_down(&mut self) {
        if self.state.history_index < self.state.history.len() {
            self.state.history_index += 1;
            self.state.input_buffer = if self.state.history_index >= self.state.history.len() {
                String::new()
            } else {
                self.state.history[self.state.history_index].clone()
            };
            self.state.input_cursor = self.state.input_buffer.len();
        }
    }
}

fn prev_boundary(s: &str, pos: usize) -> usize {
    s[..pos].chars().next_back().map_or(0, |c| pos - c.len_utf8())
}

fn next_boundary(s: &str, pos: usize) -> usize {
    s[pos..].chars().next().map_or(pos, |c| pos + c.len_utf8())
}
