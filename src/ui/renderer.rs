//! Draw the active screen.

use std::time::Instant;

use ratatui::Frame;

use crate::app::App;
use crate::state::Screen;
use crate::ui::layout;
use crate::ui::theme::SPINNER;
use crate::ui::widgets::{render_chat, render_header, render_home, render_input, render_status};

pub fn render(f: &mut Frame, app: &App, tick: usize, now: Instant) {
    let area = f.area();
    let spinner_char = SPINNER[tick % SPINNER.len()];
    let state = &app.state;

    match state.screen {
        Screen::Home => {
            let regions = layout::home(area);
            render_header(f, regions.header);
            render_home(f, &state.home, regions.sections, now);
            render_status(f, regions.status, state.screen, false, false, spinner_char);
        }
        Screen::Chat => {
            let regions = layout::chat(area);
            render_chat(f, &state.chat, regions.chat);
            render_input(f, state.input_buffer(), state.input_cursor(), state.busy(), regions.input);
            render_status(
                f,
                regions.status,
                state.screen,
                state.loading,
                state.revealing.is_some(),
                spinner_char,
            );
        }
    }
}
