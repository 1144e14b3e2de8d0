use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use dg_base::Cell;
use dg_base::config::{labels, theme};

use super::helpers::truncate_string;
use crate::state::{Focus, State};

pub fn render_grid(frame: &mut Frame, state: &mut State, area: Rect) {
    let title = if state.grid.is_empty() {
        " Grid ".to_string()
    } else {
        format!(" Grid {}x{} ", state.grid.rows(), state.grid.cols())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::border()))
        .title(Span::styled(title, Style::default().fg(theme::text_secondary()).bold()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.grid.is_empty() {
        let hint = Span::styled(labels::grid().empty.as_str(), Style::default().fg(theme::text_muted()));
        let msg = Paragraph::new(Line::from(hint)).alignment(Alignment::Center);
        let y = inner.y + inner.height / 2;
        frame.render_widget(msg, Rect::new(inner.x, y, inner.width, inner.height.min(1)));
        return;
    }

    let (rows, cols) = (state.grid.rows(), state.grid.cols());
    let cursor = if state.focus == Focus::Grid { Some(state.cursor) } else { None };
    let editing = state.session.target();

    for idx in 0..state.grid.len() {
        let Some((row, col)) = state.grid.coords_of(idx) else { continue };
        let rect = cell_rect(inner, rows, cols, row, col);
        if rect.width == 0 || rect.height == 0 {
            continue;
        }
        state.layout.cells.push((idx, rect));

        let highlight = if editing == Some(idx) || cursor == Some(idx) {
            theme::accent()
        } else if state.hover == Some(idx) {
            theme::accent_dim()
        } else {
            theme::border_muted()
        };
        render_cell(frame, state.grid.get_cell(idx), idx, rect, highlight);
    }
}

/// Screen rect of the cell at (`row`, `col`) when `area` is split evenly
/// into `rows` x `cols`. Rounding leftovers go to the later cells.
pub fn cell_rect(area: Rect, rows: usize, cols: usize, row: usize, col: usize) -> Rect {
    if rows == 0 || cols == 0 {
        return Rect::new(area.x, area.y, 0, 0);
    }
    let (w, h) = (area.width as usize, area.height as usize);
    let x0 = w * col / cols;
    let x1 = w * (col + 1) / cols;
    let y0 = h * row / rows;
    let y1 = h * (row + 1) / rows;
    Rect::new(area.x + x0 as u16, area.y + y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16)
}

fn render_cell(frame: &mut Frame, cell: &Cell, idx: usize, rect: Rect, highlight: Color) {
    let glyphs = labels::cell_glyphs();

    // Too small for a border: a single glyph
    if rect.width < 4 || rect.height < 3 {
        let glyph = if cell.is_empty() { &glyphs.empty } else { &glyphs.command };
        let span = Span::styled(glyph.as_str(), Style::default().fg(highlight));
        frame.render_widget(Paragraph::new(Line::from(span)), rect);
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(highlight))
        .title(Span::styled(format!("{}", idx), Style::default().fg(theme::text_muted())));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let width = inner.width as usize;
    let icon_line = match cell.icon {
        Some(_) => Line::from(Span::styled(
            truncate_string(&format!("{} {}", glyphs.icon, labels::grid().has_icon), width),
            Style::default().fg(theme::success()),
        )),
        None => Line::from(Span::styled(
            truncate_string(&labels::grid().no_icon, width),
            Style::default().fg(theme::text_muted()),
        )),
    };
    let mut lines = vec![icon_line];
    if let Some(label) = command_label(cell, width) {
        lines.push(Line::from(Span::styled(label, Style::default().fg(theme::text()))));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Command text shown under the icon line, fitted to `width` columns.
fn command_label(cell: &Cell, width: usize) -> Option<String> {
    let command = cell.command.as_deref().map(str::trim).filter(|c| !c.is_empty())?;
    let glyph = &labels::cell_glyphs().command;
    Some(truncate_string(&format!("{} {}", glyph, command), width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_tile_the_area() {
        let area = Rect::new(2, 5, 10, 7);
        let rects: Vec<Rect> =
            (0..2).flat_map(|r| (0..3).map(move |c| cell_rect(area, 2, 3, r, c))).collect();
        let total: u32 = rects.iter().map(|r| r.width as u32 * r.height as u32).sum();
        assert_eq!(total, 70);
        assert_eq!(rects[0], Rect::new(2, 5, 3, 3));
        assert_eq!(rects[5], Rect::new(8, 8, 4, 4));
    }

    #[test]
    fn zero_dimensions_give_empty_rect() {
        assert_eq!(cell_rect(Rect::new(0, 0, 10, 10), 0, 3, 0, 0).area(), 0);
    }

    #[test]
    fn command_label_skips_blank_commands() {
        let blank = Cell { command: Some("  ".into()), ..Cell::default() };
        assert_eq!(command_label(&blank, 10), None);
        assert_eq!(command_label(&Cell::default(), 10), None);

        let cell = Cell { command: Some("ls".into()), ..Cell::default() };
        assert_eq!(command_label(&cell, 20), Some(format!("{} ls", labels::cell_glyphs().command)));
    }
}
