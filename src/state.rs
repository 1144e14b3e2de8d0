//! Editor state: the core holders plus everything the view layer needs.

use std::path::PathBuf;

use ratatui::layout::Rect;

use dg_mod_grid::{CloseSchedule, EditSession, GridStore};

/// Which top-level region receives keys while no session is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Controls,
    Grid,
}

/// Items of the controls bar, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlField {
    Rows,
    Cols,
    GenerateGrid,
    GenerateConfig,
}

impl ControlField {
    pub const ORDER: [ControlField; 4] =
        [ControlField::Rows, ControlField::Cols, ControlField::GenerateGrid, ControlField::GenerateConfig];

    pub fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn is_text(self) -> bool {
        matches!(self, ControlField::Rows | ControlField::Cols)
    }
}

/// Fields of the edit modal, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalField {
    Icon,
    Command,
    Args,
    Save,
    Cancel,
}

impl ModalField {
    pub const ORDER: [ModalField; 5] =
        [ModalField::Icon, ModalField::Command, ModalField::Args, ModalField::Save, ModalField::Cancel];

    pub fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// Screen rectangles from the last render, used for mouse hit-testing.
#[derive(Debug, Clone, Default)]
pub struct LayoutCache {
    pub controls: Vec<(ControlField, Rect)>,
    pub cells: Vec<(usize, Rect)>,
    pub modal: Option<Rect>,
    pub modal_fields: Vec<(ModalField, Rect)>,
}

pub struct State {
    pub grid: GridStore,
    pub session: EditSession,
    pub closes: CloseSchedule,

    pub rows_input: String,
    pub cols_input: String,
    pub focus: Focus,
    pub control_field: ControlField,
    /// Keyboard cursor in the grid (linear index)
    pub cursor: usize,
    /// Cell under the mouse pointer; drives the hover preview
    pub hover: Option<usize>,

    pub modal_field: ModalField,
    /// Path typed into the modal's icon field
    pub icon_path: String,
    /// Id of the icon read whose result may still be applied, if any
    pub icon_loading: Option<u64>,
    /// Last icon read id handed out
    pub icon_requests: u64,

    pub status: Option<StatusMessage>,
    pub output_path: PathBuf,
    pub layout: LayoutCache,
    pub dirty: bool,
}

impl State {
    pub fn new(output_path: PathBuf) -> Self {
        Self {
            grid: GridStore::new(),
            session: EditSession::new(),
            closes: CloseSchedule::new(),
            rows_input: String::from("0"),
            cols_input: String::from("0"),
            focus: Focus::Controls,
            control_field: ControlField::Rows,
            cursor: 0,
            hover: None,
            modal_field: ModalField::Command,
            icon_path: String::new(),
            icon_loading: None,
            icon_requests: 0,
            status: None,
            output_path,
            layout: LayoutCache::default(),
            dirty: true,
        }
    }

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage { kind, text: text.into() });
    }

    /// Cell whose preview should be shown: the hovered cell, else the
    /// keyboard cursor when the grid has focus. Never while editing.
    pub fn preview_index(&self) -> Option<usize> {
        if self.session.is_visible() {
            return None;
        }
        self.hover.or(if self.focus == Focus::Grid && !self.grid.is_empty() { Some(self.cursor) } else { None })
    }
}
