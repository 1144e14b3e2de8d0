//! Hover preview of a cell's command and args.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use dg_base::Cell;
use dg_base::config::{labels, theme};

use super::helpers::truncate_string;
use crate::state::State;

/// What the preview box shows for one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellPreview {
    pub command: String,
    pub args: String,
}

impl CellPreview {
    /// Build the preview for `cell`, or `None` when there is nothing worth
    /// showing: a blank command and no non-blank arg. The command is shown
    /// as stored.
    pub fn for_cell(cell: &Cell) -> Option<Self> {
        let command = cell.command.as_deref().filter(|c| !c.is_empty());
        let args: Vec<&str> =
            cell.args.iter().flatten().map(String::as_str).filter(|a| !a.trim().is_empty()).collect();
        if command.is_none_or(|c| c.trim().is_empty()) && args.is_empty() {
            return None;
        }
        Some(Self {
            command: command.map(str::to_string).unwrap_or_else(|| labels::preview().missing.clone()),
            args: args.join(" "),
        })
    }

    fn lines(&self) -> [String; 2] {
        let names = labels::preview();
        [format!("{}: {}", names.command, self.command), format!("{}: {}", names.args, self.args)]
    }
}

/// Draw the preview for cell `idx` just below its rect, or above it when
/// there is no room below. Stays inside `bounds`.
pub fn render_preview(frame: &mut Frame, state: &State, idx: usize, bounds: Rect) {
    let Some(preview) = state.grid.get(idx).and_then(CellPreview::for_cell) else {
        return;
    };
    let Some(&(_, cell)) = state.layout.cells.iter().find(|(i, _)| *i == idx) else {
        return;
    };

    let text = preview.lines();
    let content_width = text.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
    let width = (content_width + 4).min(bounds.width);
    let height = 4u16.min(bounds.height);
    if width < 5 || height < 3 {
        return;
    }

    let below = cell.bottom();
    let y = if below + height <= bounds.bottom() { below } else { cell.y.saturating_sub(height).max(bounds.y) };
    let x = cell.x.min(bounds.right().saturating_sub(width));
    let rect = Rect::new(x, y, width, height);

    let inner_width = width.saturating_sub(4) as usize;
    let lines: Vec<Line> = text
        .iter()
        .map(|l| {
            let content = format!(" {}", truncate_string(l, inner_width));
            Line::from(Span::styled(content, Style::default().fg(theme::text())))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::accent_dim()))
        .style(Style::default().bg(theme::bg_elevated()));

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(command: Option<&str>, args: Option<&[&str]>) -> Cell {
        Cell {
            icon: None,
            command: command.map(String::from),
            args: args.map(|a| a.iter().map(|s| s.to_string()).collect()),
        }
    }

    #[test]
    fn empty_cell_has_no_preview() {
        assert_eq!(CellPreview::for_cell(&Cell::default()), None);
    }

    #[test]
    fn blank_command_and_blank_args_have_no_preview() {
        assert_eq!(CellPreview::for_cell(&cell(Some(""), Some(&[""]))), None);
        assert_eq!(CellPreview::for_cell(&cell(Some("  "), Some(&[" ", ""]))), None);
    }

    #[test]
    fn command_only() {
        let preview = CellPreview::for_cell(&cell(Some("ls"), Some(&[""]))).unwrap();
        assert_eq!(preview.command, "ls");
        assert_eq!(preview.args, "");
    }

    #[test]
    fn args_without_command_show_missing_marker() {
        let preview = CellPreview::for_cell(&cell(Some(""), Some(&["-v", "", "x"]))).unwrap();
        assert_eq!(preview.command, labels::preview().missing);
        assert_eq!(preview.args, "-v x");
    }

    #[test]
    fn command_is_shown_untrimmed() {
        let preview = CellPreview::for_cell(&cell(Some("  ls "), None)).unwrap();
        assert_eq!(preview.command, "  ls ");

        let preview = CellPreview::for_cell(&cell(Some("  "), Some(&["-v"]))).unwrap();
        assert_eq!(preview.command, "  ");
        assert_eq!(preview.args, "-v");
    }

    #[test]
    fn icon_alone_has_no_preview() {
        let with_icon = Cell { icon: Some("data:a,b".into()), ..Cell::default() };
        assert_eq!(CellPreview::for_cell(&with_icon), None);
    }
}
