use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::app::actions::Action;
use crate::state::{ControlField, ModalField, State};

/// Handle mouse events and return appropriate action
pub fn handle_mouse(event: &MouseEvent, state: &State) -> Action {
    let pos = Position::new(event.column, event.row);

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_left_click(pos, state),
        MouseEventKind::Moved => handle_move(pos, state),
        _ => Action::None,
    }
}

fn hit<T: Copy>(rects: &[(T, Rect)], pos: Position) -> Option<T> {
    rects.iter().find(|(_, rect)| rect.contains(pos)).map(|(item, _)| *item)
}

fn handle_left_click(pos: Position, state: &State) -> Action {
    if state.session.is_open() {
        return handle_modal_click(pos, state);
    }

    if let Some(field) = hit(&state.layout.controls, pos) {
        return match field {
            ControlField::GenerateGrid => Action::GenerateGrid,
            ControlField::GenerateConfig => Action::ExportConfig,
            text_field => Action::SelectControl(text_field),
        };
    }

    match hit(&state.layout.cells, pos) {
        Some(idx) => Action::OpenCell(idx),
        None => Action::None,
    }
}

/// Clicks inside the modal pick a field or press a button; a click on the
/// backdrop cancels.
fn handle_modal_click(pos: Position, state: &State) -> Action {
    let inside = state.layout.modal.is_some_and(|rect| rect.contains(pos));
    if !inside {
        return Action::CancelSession;
    }
    match hit(&state.layout.modal_fields, pos) {
        Some(ModalField::Save) => Action::SaveSession,
        Some(ModalField::Cancel) => Action::CancelSession,
        Some(field) => Action::ModalSelectField(field),
        None => Action::None,
    }
}

/// Track the cell under the pointer for the hover preview. Only emits an
/// action when the hovered cell changes.
fn handle_move(pos: Position, state: &State) -> Action {
    if state.session.is_visible() {
        return Action::None;
    }
    let over = hit(&state.layout.cells, pos);
    if over == state.hover { Action::None } else { Action::HoverCell(over) }
}
