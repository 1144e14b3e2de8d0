use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::actions::Action;
use crate::app::mouse::handle_mouse;
use crate::state::{Focus, ModalField, State};

/// Map a terminal event to an action. `None` means quit.
pub fn handle_event(event: &Event, state: &State) -> Option<Action> {
    match event {
        // Windows reports releases too; act on presses only
        Event::Key(key) if key.kind != KeyEventKind::Press => Some(Action::None),
        Event::Key(key) => {
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

            // Global Ctrl shortcuts (always handled first)
            if ctrl {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('c') => return None,
                    KeyCode::Char('s') if state.session.is_open() => return Some(Action::SaveSession),
                    KeyCode::Char('e') if !state.session.is_open() => return Some(Action::ExportConfig),
                    KeyCode::Char('g') if !state.session.is_open() => return Some(Action::GenerateGrid),
                    _ => return Some(Action::None),
                }
            }

            // The open modal owns the keyboard
            if state.session.is_open() {
                return Some(handle_modal_key(key, state));
            }

            let action = match state.focus {
                Focus::Controls => handle_controls_key(key, state),
                Focus::Grid => handle_grid_key(key),
            };
            Some(action)
        }
        Event::Paste(text) if state.session.is_open() => Some(Action::ModalPaste(text.clone())),
        Event::Mouse(mouse) => Some(handle_mouse(mouse, state)),
        _ => Some(Action::None),
    }
}

fn handle_modal_key(key: &KeyEvent, state: &State) -> Action {
    let on_button = matches!(state.modal_field, ModalField::Save | ModalField::Cancel);
    match key.code {
        KeyCode::Esc => Action::CancelSession,
        KeyCode::Tab | KeyCode::Down => Action::ModalNextField,
        KeyCode::BackTab | KeyCode::Up => Action::ModalPrevField,
        KeyCode::Left | KeyCode::Right if on_button => Action::ModalSelectField(match state.modal_field {
            ModalField::Save => ModalField::Cancel,
            _ => ModalField::Save,
        }),
        KeyCode::Enter => Action::ModalActivate,
        KeyCode::Backspace => Action::ModalBackspace,
        KeyCode::Char(' ') if on_button => Action::ModalActivate,
        KeyCode::Char(c) => Action::ModalChar(c),
        _ => Action::None,
    }
}

fn handle_controls_key(key: &KeyEvent, state: &State) -> Action {
    match key.code {
        KeyCode::Tab | KeyCode::Down | KeyCode::Esc => Action::ToggleFocus,
        KeyCode::BackTab | KeyCode::Left => Action::PrevControl,
        KeyCode::Right => Action::NextControl,
        KeyCode::Enter => Action::ActivateControl,
        KeyCode::Char(' ') if !state.control_field.is_text() => Action::ActivateControl,
        KeyCode::Backspace => Action::ControlBackspace,
        KeyCode::Char(c) if state.control_field.is_text() => Action::ControlChar(c),
        _ => Action::None,
    }
}

fn handle_grid_key(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc => Action::ToggleFocus,
        KeyCode::Up | KeyCode::Char('k') => Action::CursorUp,
        KeyCode::Down | KeyCode::Char('j') => Action::CursorDown,
        KeyCode::Left | KeyCode::Char('h') => Action::CursorLeft,
        KeyCode::Right | KeyCode::Char('l') => Action::CursorRight,
        KeyCode::Enter | KeyCode::Char(' ') => Action::OpenCursorCell,
        KeyCode::Char('e') => Action::ExportConfig,
        _ => Action::None,
    }
}
