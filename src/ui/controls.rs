use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use dg_base::config::{chars, labels, theme};

use crate::state::{ControlField, Focus, State};

const GAP: u16 = 2;

pub fn render_controls(frame: &mut Frame, state: &mut State, area: Rect) {
    let focused = state.focus == Focus::Controls && !state.session.is_open();
    let border = if focused { theme::accent() } else { theme::border() };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme::bg_surface()))
        .title(Span::styled(format!(" {} ", labels::title()), Style::default().fg(theme::accent()).bold()));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let mut spans = vec![Span::raw(" ")];
    let mut x = inner.x + 1;
    for field in ControlField::ORDER {
        let selected = focused && state.control_field == field;
        let text = control_text(state, field, selected);
        let width = text.width() as u16;

        let visible = width.min(inner.right().saturating_sub(x));
        if visible > 0 {
            state.layout.controls.push((field, Rect::new(x, inner.y, visible, 1)));
        }
        spans.push(Span::styled(text, control_style(field, selected)));
        spans.push(Span::raw(" ".repeat(GAP as usize)));
        x = x.saturating_add(width + GAP);
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn control_text(state: &State, field: ControlField, selected: bool) -> String {
    let names = labels::controls();
    let cursor = if selected { chars::CURSOR } else { "" };
    match field {
        ControlField::Rows => format!("{}: [{}{}]", names.rows, state.rows_input, cursor),
        ControlField::Cols => format!("{}: [{}{}]", names.cols, state.cols_input, cursor),
        ControlField::GenerateGrid => format!("[ {} ]", names.generate_grid),
        ControlField::GenerateConfig => format!("[ {} ]", names.generate_config),
    }
}

fn control_style(field: ControlField, selected: bool) -> Style {
    match (field.is_text(), selected) {
        (true, true) => Style::default().fg(theme::accent()).bold(),
        (true, false) => Style::default().fg(theme::text()),
        (false, true) => Style::default().fg(theme::bg_base()).bg(theme::accent()).bold(),
        (false, false) => Style::default().fg(theme::text_secondary()).bg(theme::bg_elevated()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn text_fields_show_cursor_when_selected() {
        let mut state = State::new(PathBuf::from("config.json"));
        state.rows_input = "3".into();
        let names = labels::controls();
        assert_eq!(control_text(&state, ControlField::Rows, false), format!("{}: [3]", names.rows));
        assert_eq!(control_text(&state, ControlField::Rows, true), format!("{}: [3{}]", names.rows, chars::CURSOR));
    }

    #[test]
    fn buttons_are_bracketed() {
        let state = State::new(PathBuf::from("config.json"));
        let text = control_text(&state, ControlField::GenerateConfig, true);
        assert_eq!(text, format!("[ {} ]", labels::controls().generate_config));
    }
}
