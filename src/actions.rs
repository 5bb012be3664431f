//! User and system actions.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,

    StartChat,
    BackHome,
    HomeScrollUp,
    HomeScrollDown,

    Char(char),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ClearInput,
    Submit,

    ChatScrollUp,
    ChatScrollDown,
    ChatScrollPageUp,
    ChatScrollPageDown,
    ChatScrollBottom,

    HistoryUp,
    HistoryDown,
}
