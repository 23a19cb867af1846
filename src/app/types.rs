use ratatui::widgets::TableState;

use crate::hosts::Catalog;

/// The four editable fields, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Target,
    JumpHost,
    Options,
    Command,
}

impl FieldId {
    pub const ALL: [FieldId; 4] = [
        FieldId::Target,
        FieldId::JumpHost,
        FieldId::Options,
        FieldId::Command,
    ];

    pub fn index(self) -> usize {
        match self {
            FieldId::Target => 0,
            FieldId::JumpHost => 1,
            FieldId::Options => 2,
            FieldId::Command => 3,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Only the host-valued fields drive the table filter.
    pub fn filters(self) -> bool {
        matches!(self, FieldId::Target | FieldId::JumpHost)
    }

    pub fn title(self) -> &'static str {
        match self {
            FieldId::Target => "Target",
            FieldId::JumpHost => "Jump host",
            FieldId::Options => "SSH options",
            FieldId::Command => "Remote command",
        }
    }
}

/// Single line text buffer. `cursor` counts chars, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub(super) value: String,
    pub(super) cursor: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    ClearLine,
    DeleteWord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMove {
    Up,
    Down,
    PageUp,
    PageDown,
    First,
    Last,
}

/// Everything the selector reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorEvent {
    NextField,
    PrevField,
    Edit(EditAction),
    MoveRow(RowMove),
    PickRow,
    Confirm,
    Cancel,
    Resize { width: u16, height: u16 },
    ToggleHelp,
    ScrollHelp(i16),
}

/// What the selector hands back on confirm.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub target: String,
    pub proxy_jump: String,
    pub options: Vec<String>,
    pub command: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Confirmed(Selection),
    Cancelled,
}

/// Initial field contents supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct SelectorDefaults {
    pub target: String,
    pub proxy_jump: String,
    pub options: String,
    pub command: String,
}

/// Geometry derived from the viewport on every resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLayout {
    pub width: u16,
    pub height: u16,
    pub field_width: u16,
    /// alias, user, hostname, port, source
    pub columns: [u16; 5],
    pub table_rows: u16,
}

#[derive(Debug)]
pub struct App {
    pub catalog: Catalog,
    pub(super) fields: [TextField; 4],
    pub(super) focus: FieldId,

    // Table view
    pub(super) filter_query: String,
    pub(super) filtered: Vec<usize>,
    pub table_state: TableState,

    pub layout: ViewLayout,
    pub status_message: Option<String>,

    // Help popup
    pub show_help: bool,
    pub help_scroll: u16,

    pub quitting: bool,
    pub(super) result: Option<Selection>,
}
