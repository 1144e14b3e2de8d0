mod controls;
mod grid;
mod helpers;
mod modal;
pub mod preview;
mod status;

use ratatui::{prelude::*, widgets::Block};

use dg_base::config::theme;
use dg_base::constants::{CONTROLS_HEIGHT, STATUS_BAR_HEIGHT};

use crate::state::{LayoutCache, State};

pub fn render(frame: &mut Frame, state: &mut State) {
    let area = frame.area();

    // Fill base background
    frame.render_widget(Block::default().style(Style::default().bg(theme::bg_base())), area);

    // Hit-test rectangles are rebuilt on every frame
    state.layout = LayoutCache::default();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CONTROLS_HEIGHT), // Controls bar
            Constraint::Min(1),                  // Grid
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    controls::render_controls(frame, state, main_layout[0]);
    grid::render_grid(frame, state, main_layout[1]);
    status::render_status_bar(frame, state, main_layout[2]);

    if let Some(idx) = state.preview_index() {
        preview::render_preview(frame, state, idx, main_layout[1]);
    }
    if state.session.is_visible() {
        modal::render_modal(frame, state, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ControlField, ModalField};
    use ratatui::backend::TestBackend;
    use std::path::PathBuf;

    fn draw(state: &mut State) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        terminal
    }

    #[test]
    fn render_records_controls_and_cells() {
        let mut state = State::new(PathBuf::from("config.json"));
        state.grid.set_dimensions(2, 3);
        draw(&mut state);

        let fields: Vec<ControlField> = state.layout.controls.iter().map(|(f, _)| *f).collect();
        assert_eq!(fields, ControlField::ORDER.to_vec());
        assert_eq!(state.layout.cells.len(), 6);
        assert!(state.layout.modal.is_none());
    }

    #[test]
    fn open_session_records_modal() {
        let mut state = State::new(PathBuf::from("config.json"));
        state.grid.set_dimensions(1, 1);
        state.session.open(&state.grid, 0);
        draw(&mut state);

        assert!(state.layout.modal.is_some());
        assert!(state.layout.modal_fields.iter().any(|(f, _)| *f == ModalField::Save));
    }

    #[test]
    fn empty_grid_renders_without_cells() {
        let mut state = State::new(PathBuf::from("config.json"));
        draw(&mut state);
        assert!(state.layout.cells.is_empty());
    }
}
