//! TUI widgets: home banner and sections, chat, input, status.

pub mod chat;
mod header;
mod home;
mod input;
mod status;

pub use chat::render as render_chat;
pub use header::render as render_header;
pub use home::render as render_home;
pub use input::render as render_input;
pub use status::render as render_status;
