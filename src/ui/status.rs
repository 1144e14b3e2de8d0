use ratatui::{prelude::*, widgets::Paragraph};

use crate::state::{Focus, State, StatusKind};
use dg_base::config::theme;

pub fn render_status_bar(frame: &mut Frame, state: &State, area: Rect) {
    let base_style = Style::default().bg(theme::bg_base()).fg(theme::text_muted());

    let (badge, badge_bg) = if state.session.is_open() {
        ("EDIT", theme::accent())
    } else if state.session.is_closing() {
        ("CLOSING", theme::text_muted())
    } else {
        match state.focus {
            Focus::Controls => ("CONTROLS", theme::accent_dim()),
            Focus::Grid => ("GRID", theme::accent_dim()),
        }
    };

    let mut spans = vec![
        Span::styled(" ", base_style),
        Span::styled(format!(" {} ", badge), Style::default().fg(theme::bg_base()).bg(badge_bg).bold()),
        Span::styled(" ", base_style),
    ];

    for (key, what) in key_hints(state) {
        spans.push(Span::styled(*key, Style::default().fg(theme::warning())));
        spans.push(Span::styled(format!(" {}  ", what), base_style));
    }

    if let Some(status) = &state.status {
        let color = match status.kind {
            StatusKind::Info => theme::text_secondary(),
            StatusKind::Success => theme::success(),
            StatusKind::Error => theme::error(),
        };
        spans.push(Span::styled(status.text.clone(), Style::default().fg(color)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(base_style), area);
}

fn key_hints(state: &State) -> &'static [(&'static str, &'static str)] {
    if state.session.is_open() {
        &[("Tab", "field"), ("Enter", "confirm"), ("Ctrl+S", "save"), ("Esc", "cancel")]
    } else {
        match state.focus {
            Focus::Controls => &[("Tab", "grid"), ("←→", "move"), ("Enter", "activate"), ("Ctrl+Q", "quit")],
            Focus::Grid => {
                &[("Tab", "controls"), ("hjkl", "move"), ("Enter", "edit"), ("e", "export"), ("Ctrl+Q", "quit")]
            }
        }
    }
}
