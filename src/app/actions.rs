use std::path::PathBuf;

use dg_base::constants::CLOSE_DELAY_MS;
use dg_mod_grid::{CloseTicket, parse_dimension};

use crate::state::{ControlField, Focus, ModalField, State, StatusKind};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    /// Switch keyboard focus between controls bar and grid
    ToggleFocus,
    SelectControl(ControlField),
    NextControl,
    PrevControl,
    ControlChar(char),
    ControlBackspace,
    /// Enter on the focused control
    ActivateControl,
    GenerateGrid,
    ExportConfig,
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    OpenCursorCell,
    OpenCell(usize),
    HoverCell(Option<usize>),
    ModalSelectField(ModalField),
    ModalNextField,
    ModalPrevField,
    ModalChar(char),
    ModalPaste(String),
    ModalBackspace,
    /// Enter on the focused modal field
    ModalActivate,
    SaveSession,
    CancelSession,
}

/// Side effects the event loop performs after a state change.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    Nothing,
    /// Read an icon file in the background. `request` is the id stored in
    /// `State::icon_loading`; only that read's result may be applied.
    LoadIcon { path: PathBuf, generation: u64, request: u64 },
    /// Write the current export to `State::output_path`
    WriteExport,
}

pub fn apply_action(state: &mut State, action: Action, now_ms: u64) -> ActionResult {
    match action {
        Action::None => ActionResult::Nothing,
        Action::ToggleFocus => {
            state.focus = match state.focus {
                Focus::Controls if !state.grid.is_empty() => Focus::Grid,
                _ => Focus::Controls,
            };
            state.hover = None;
            ActionResult::Nothing
        }
        Action::SelectControl(field) => {
            state.focus = Focus::Controls;
            state.control_field = field;
            ActionResult::Nothing
        }
        Action::NextControl => {
            state.control_field = state.control_field.next();
            ActionResult::Nothing
        }
        Action::PrevControl => {
            state.control_field = state.control_field.prev();
            ActionResult::Nothing
        }
        Action::ControlChar(c) => {
            if let Some(input) = control_input(state) {
                input.push(c);
            }
            ActionResult::Nothing
        }
        Action::ControlBackspace => {
            if let Some(input) = control_input(state) {
                input.pop();
            }
            ActionResult::Nothing
        }
        Action::ActivateControl => match state.control_field {
            ControlField::Rows | ControlField::Cols | ControlField::GenerateGrid => {
                apply_action(state, Action::GenerateGrid, now_ms)
            }
            ControlField::GenerateConfig => apply_action(state, Action::ExportConfig, now_ms),
        },
        Action::GenerateGrid => {
            let rows = parse_dimension(&state.rows_input);
            let cols = parse_dimension(&state.cols_input);
            state.grid.set_dimensions(rows, cols);
            state.rows_input = rows.to_string();
            state.cols_input = cols.to_string();
            state.cursor = 0;
            state.hover = None;
            state.set_status(StatusKind::Info, format!("Grid {}x{} ({} buttons)", rows, cols, state.grid.len()));
            ActionResult::Nothing
        }
        Action::ExportConfig => ActionResult::WriteExport,
        Action::CursorUp => move_cursor(state, -1, 0),
        Action::CursorDown => move_cursor(state, 1, 0),
        Action::CursorLeft => move_cursor(state, 0, -1),
        Action::CursorRight => move_cursor(state, 0, 1),
        Action::OpenCursorCell => {
            let idx = state.cursor;
            apply_action(state, Action::OpenCell(idx), now_ms)
        }
        Action::OpenCell(idx) => {
            if idx >= state.grid.len() {
                return ActionResult::Nothing;
            }
            // Hover preview belongs to the grid view; drop it before editing.
            state.hover = None;
            state.cursor = idx;
            state.focus = Focus::Grid;
            state.session.open(&state.grid, idx);
            state.modal_field = ModalField::Command;
            state.icon_path.clear();
            state.icon_loading = None;
            ActionResult::Nothing
        }
        Action::HoverCell(idx) => {
            state.hover = idx.filter(|i| *i < state.grid.len());
            ActionResult::Nothing
        }
        Action::ModalSelectField(field) => {
            state.modal_field = field;
            ActionResult::Nothing
        }
        Action::ModalNextField => {
            state.modal_field = state.modal_field.next();
            ActionResult::Nothing
        }
        Action::ModalPrevField => {
            state.modal_field = state.modal_field.prev();
            ActionResult::Nothing
        }
        Action::ModalChar(c) => {
            edit_modal_text(state, |text| text.push(c));
            ActionResult::Nothing
        }
        Action::ModalPaste(pasted) => {
            let single_line = pasted.replace(['\r', '\n'], " ");
            edit_modal_text(state, |text| text.push_str(&single_line));
            ActionResult::Nothing
        }
        Action::ModalBackspace => {
            edit_modal_text(state, |text| {
                text.pop();
            });
            ActionResult::Nothing
        }
        Action::ModalActivate => match state.modal_field {
            ModalField::Icon => request_icon(state),
            ModalField::Command | ModalField::Args => {
                state.modal_field = state.modal_field.next();
                ActionResult::Nothing
            }
            ModalField::Save => apply_action(state, Action::SaveSession, now_ms),
            ModalField::Cancel => apply_action(state, Action::CancelSession, now_ms),
        },
        Action::SaveSession => {
            let target = state.session.target();
            let ticket = state.session.save(&mut state.grid);
            if let (Some(ticket), Some(idx)) = (ticket, target) {
                state.set_status(StatusKind::Success, format!("Saved button {}", idx));
                schedule_close(state, ticket, now_ms);
            }
            ActionResult::Nothing
        }
        Action::CancelSession => {
            if let Some(ticket) = state.session.cancel() {
                schedule_close(state, ticket, now_ms);
            }
            ActionResult::Nothing
        }
    }
}

fn control_input(state: &mut State) -> Option<&mut String> {
    match state.control_field {
        ControlField::Rows => Some(&mut state.rows_input),
        ControlField::Cols => Some(&mut state.cols_input),
        _ => None,
    }
}

fn move_cursor(state: &mut State, d_row: isize, d_col: isize) -> ActionResult {
    let (rows, cols) = (state.grid.rows(), state.grid.cols());
    let Some((row, col)) = state.grid.coords_of(state.cursor) else {
        return ActionResult::Nothing;
    };
    let row = (row as isize + d_row).clamp(0, rows as isize - 1) as usize;
    let col = (col as isize + d_col).clamp(0, cols as isize - 1) as usize;
    if let Some(idx) = state.grid.index_of(row, col) {
        state.cursor = idx;
    }
    state.hover = None;
    ActionResult::Nothing
}

/// Apply a text edit to the focused modal field. Ignored unless the session
/// is open: the closing phase is read-only.
fn edit_modal_text(state: &mut State, edit: impl FnOnce(&mut String)) {
    if !state.session.is_open() {
        return;
    }
    match state.modal_field {
        ModalField::Icon => edit(&mut state.icon_path),
        ModalField::Command => {
            let mut text = state.session.command().to_string();
            edit(&mut text);
            state.session.update_command(text);
        }
        ModalField::Args => {
            let mut text = state.session.args().to_string();
            edit(&mut text);
            state.session.update_args(text);
        }
        ModalField::Save | ModalField::Cancel => {}
    }
}

/// Enter on the icon field: an empty path clears the staged icon, anything
/// else starts a background read.
fn request_icon(state: &mut State) -> ActionResult {
    if !state.session.is_open() {
        return ActionResult::Nothing;
    }
    let path = state.icon_path.trim();
    if path.is_empty() {
        state.session.update_icon(None);
        state.icon_loading = None;
        state.set_status(StatusKind::Info, "Icon cleared");
        return ActionResult::Nothing;
    }
    let path = PathBuf::from(path);
    state.icon_requests += 1;
    let request = state.icon_requests;
    state.icon_loading = Some(request);
    ActionResult::LoadIcon { path, generation: state.session.generation(), request }
}

fn schedule_close(state: &mut State, ticket: CloseTicket, now_ms: u64) {
    state.closes.schedule(ticket, now_ms, CLOSE_DELAY_MS);
    state.icon_loading = None;
}

/// Redeem close tickets that have come due. Returns true if any session
/// state changed.
pub fn process_due_closes(state: &mut State, now_ms: u64) -> bool {
    let mut changed = false;
    for ticket in state.closes.take_due(now_ms) {
        changed |= state.session.finish_close(ticket);
    }
    if changed {
        state.modal_field = ModalField::Command;
        state.icon_path.clear();
    }
    changed
}
