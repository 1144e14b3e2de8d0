use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use dg_base::config::{chars, labels, theme};
use dg_base::constants::{MODAL_HEIGHT, MODAL_WIDTH};

use super::helpers::centered_rect;
use crate::state::{ModalField, State};

/// Width of the label column in front of each input
const LABEL_WIDTH: usize = 10;

pub fn render_modal(frame: &mut Frame, state: &mut State, area: Rect) {
    let overlay = centered_rect(area, MODAL_WIDTH, MODAL_HEIGHT);
    let closing = state.session.is_closing();
    let names = labels::modal();

    let (border, title_fg) =
        if closing { (theme::border_muted(), theme::text_muted()) } else { (theme::accent(), theme::accent()) };
    let title = match state.session.target() {
        Some(idx) => format!(" {} {} ", names.title, idx),
        None => format!(" {} ", names.title),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme::bg_surface()))
        .title(Span::styled(title, Style::default().fg(title_fg).bold()));
    let inner = block.inner(overlay);

    frame.render_widget(Clear, overlay);
    frame.render_widget(block, overlay);
    state.layout.modal = Some(overlay);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let value_width = (inner.width as usize).saturating_sub(LABEL_WIDTH + 4);
    let selected = |field: ModalField| !closing && state.modal_field == field;
    let mut lines: Vec<Line> = Vec::new();
    let mut rows: Vec<(ModalField, u16)> = Vec::new();

    lines.push(Line::from(""));
    lines.push(staged_icon_line(state, closing));

    rows.push((ModalField::Icon, lines.len() as u16));
    lines.push(input_line(&names.icon, &state.icon_path, value_width, selected(ModalField::Icon), closing));
    lines.push(Line::from(Span::styled(
        format!("  {}{}", " ".repeat(LABEL_WIDTH), names.icon_hint),
        Style::default().fg(theme::text_muted()).italic(),
    )));
    lines.push(Line::from(""));

    rows.push((ModalField::Command, lines.len() as u16));
    lines.push(input_line(
        &names.command,
        state.session.command(),
        value_width,
        selected(ModalField::Command),
        closing,
    ));
    lines.push(Line::from(""));

    rows.push((ModalField::Args, lines.len() as u16));
    lines.push(input_line(&names.args, state.session.args(), value_width, selected(ModalField::Args), closing));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  {}", chars::HORIZONTAL.repeat((inner.width as usize).saturating_sub(4))),
        Style::default().fg(theme::border()),
    )));

    // Buttons, right-aligned
    let save = format!("[ {} ]", names.save);
    let cancel = format!("[ {} ]", names.cancel);
    let buttons_width = save.width() + 2 + cancel.width() + 2;
    let pad = (inner.width as usize).saturating_sub(buttons_width);
    let button_row = lines.len() as u16;
    lines.push(Line::from(vec![
        Span::raw(" ".repeat(pad)),
        Span::styled(save.clone(), button_style(selected(ModalField::Save), closing)),
        Span::raw("  "),
        Span::styled(cancel.clone(), button_style(selected(ModalField::Cancel), closing)),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);

    // Hit-test rects for the mouse
    for (field, row) in rows {
        if row < inner.height {
            state.layout.modal_fields.push((field, Rect::new(inner.x, inner.y + row, inner.width, 1)));
        }
    }
    if button_row < inner.height {
        let y = inner.y + button_row;
        let save_x = inner.x + pad as u16;
        let cancel_x = save_x + save.width() as u16 + 2;
        let right = inner.right();
        let clip = |x: u16, w: u16| Rect::new(x, y, w.min(right.saturating_sub(x)), 1);
        state.layout.modal_fields.push((ModalField::Save, clip(save_x, save.width() as u16)));
        state.layout.modal_fields.push((ModalField::Cancel, clip(cancel_x, cancel.width() as u16)));
    }
}

fn staged_icon_line(state: &State, closing: bool) -> Line<'static> {
    let names = labels::modal();
    let (text, color) = if state.icon_loading.is_some() {
        (names.loading.clone(), theme::warning())
    } else {
        match state.session.icon() {
            Some(uri) => (format!("{} {} bytes staged", chars::CHECK, uri.len()), theme::success()),
            None => (format!("{} {}", chars::CROSS, labels::grid().no_icon), theme::text_muted()),
        }
    };
    let color = if closing { theme::text_muted() } else { color };
    Line::from(vec![
        Span::styled(format!("  {:<width$}", "", width = LABEL_WIDTH), Style::default()),
        Span::styled(text, Style::default().fg(color)),
    ])
}

fn input_line(label: &str, value: &str, width: usize, selected: bool, closing: bool) -> Line<'static> {
    let label_style = if selected {
        Style::default().fg(theme::accent()).bold()
    } else {
        Style::default().fg(theme::text_secondary())
    };
    let value_style =
        if closing { Style::default().fg(theme::text_muted()) } else { Style::default().fg(theme::text()) };
    let marker = if selected { chars::ARROW_RIGHT } else { " " };
    let cursor = if selected { chars::CURSOR } else { "" };

    Line::from(vec![
        Span::styled(format!("{} ", marker), Style::default().fg(theme::accent())),
        Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), label_style),
        Span::styled(
            format!("{}{}", fit_tail(value, width.saturating_sub(1)), cursor),
            value_style.bg(theme::bg_elevated()),
        ),
    ])
}

fn button_style(selected: bool, closing: bool) -> Style {
    if closing {
        Style::default().fg(theme::text_muted()).bg(theme::bg_elevated())
    } else if selected {
        Style::default().fg(theme::bg_base()).bg(theme::accent()).bold()
    } else {
        Style::default().fg(theme::text()).bg(theme::bg_elevated())
    }
}

/// Keep the end of `s` within `max_width` columns, so the text being typed
/// stays visible. A leading ellipsis marks the cut.
fn fit_tail(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut kept: Vec<char> = Vec::new();
    let mut width = 0;
    for c in s.chars().rev() {
        let cw = c.width().unwrap_or(0);
        if width + cw + 1 > max_width {
            break;
        }
        kept.push(c);
        width += cw;
    }
    let mut result = String::new();
    if max_width > 0 {
        result.push('…');
    }
    result.extend(kept.into_iter().rev());
    result
}
