//! The edit session: a staging area bound to one cell while the user edits it.
//!
//! Lifecycle: `Closed -> open() -> Open -> save()/cancel() -> Closing -> finish_close() -> Closed`.
//!
//! The Closing phase exists so the UI can play a short transition before the
//! edit surface disappears. Leaving it is driven by a `CloseTicket` that the
//! caller redeems after a delay. Each `open()` starts a new generation, so a
//! ticket issued before a re-open no longer matches and is ignored.

use dg_base::Cell;

use crate::store::GridStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Closed,
    Open,
    /// Save or cancel happened; staged values are still readable until the
    /// close ticket is redeemed.
    Closing,
}

/// Handle for the delayed second half of a close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseTicket {
    generation: u64,
}

impl CloseTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditSession {
    target: Option<usize>,
    icon: Option<String>,
    command: String,
    /// Space-separated tokens as typed, not yet split.
    args: String,
    phase: SessionPhase,
    generation: u64,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the session from the cell at `idx` and mark it open.
    ///
    /// Absent command and args become empty strings; stored args are joined
    /// with single spaces. Any pending close from an earlier session is
    /// invalidated.
    pub fn open(&mut self, grid: &GridStore, idx: usize) {
        let cell = grid.get_cell(idx);
        if self.phase == SessionPhase::Open {
            log::debug!("session reopened on {} while open on {:?}", idx, self.target);
        }
        self.generation += 1;
        self.target = Some(idx);
        self.icon = cell.icon.clone();
        self.command = cell.command.clone().unwrap_or_default();
        self.args = cell.args.as_ref().map(|a| a.join(" ")).unwrap_or_default();
        self.phase = SessionPhase::Open;
        log::info!("session {} opened on cell {}", self.generation, idx);
    }

    pub fn update_icon(&mut self, icon: Option<String>) {
        self.icon = icon;
    }

    pub fn update_command(&mut self, text: impl Into<String>) {
        self.command = text.into();
    }

    pub fn update_args(&mut self, text: impl Into<String>) {
        self.args = text.into();
    }

    /// Commit the staged values to the grid at the target index, then begin
    /// closing. Returns None (and writes nothing) unless the session is open.
    pub fn save(&mut self, grid: &mut GridStore) -> Option<CloseTicket> {
        let idx = match (self.phase, self.target) {
            (SessionPhase::Open, Some(idx)) => idx,
            _ => {
                log::warn!("save ignored: session is {:?}", self.phase);
                return None;
            }
        };

        let cell = Cell {
            icon: self.icon.clone(),
            command: Some(self.command.clone()),
            args: Some(split_args(&self.args)),
        };
        grid.set_cell(idx, cell);
        log::info!("session {} saved cell {}", self.generation, idx);

        self.begin_close()
    }

    /// Discard the staged values and begin closing. The grid is untouched.
    pub fn cancel(&mut self) -> Option<CloseTicket> {
        if self.phase != SessionPhase::Open {
            return None;
        }
        log::info!("session {} cancelled", self.generation);
        self.begin_close()
    }

    fn begin_close(&mut self) -> Option<CloseTicket> {
        self.phase = SessionPhase::Closing;
        Some(CloseTicket { generation: self.generation })
    }

    /// Second half of a close. Returns false, changing nothing, when the
    /// ticket belongs to an earlier generation or the session is not closing.
    pub fn finish_close(&mut self, ticket: CloseTicket) -> bool {
        if ticket.generation != self.generation || self.phase != SessionPhase::Closing {
            log::debug!(
                "stale close suppressed (ticket {}, current {}, {:?})",
                ticket.generation,
                self.generation,
                self.phase
            );
            return false;
        }
        self.reset();
        log::debug!("session {} closed", self.generation);
        true
    }

    fn reset(&mut self) {
        self.target = None;
        self.icon = None;
        self.command.clear();
        self.args.clear();
        self.phase = SessionPhase::Closed;
    }

    /// Whether a result tagged with `generation` still belongs to the live session.
    pub fn accepts(&self, generation: u64) -> bool {
        self.phase == SessionPhase::Open && self.generation == generation
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == SessionPhase::Open
    }

    pub fn is_closing(&self) -> bool {
        self.phase == SessionPhase::Closing
    }

    /// Open or closing: the edit surface should be drawn.
    pub fn is_visible(&self) -> bool {
        self.phase != SessionPhase::Closed
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn args(&self) -> &str {
        &self.args
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Split typed args into tokens: on single spaces, each token trimmed.
///
/// Runs of spaces produce empty tokens and an empty string produces one
/// empty token. Both are kept so "no arguments" stays distinguishable from
/// "one empty argument" downstream.
pub fn split_args(text: &str) -> Vec<String> {
    text.split(' ').map(|arg| arg.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_2x1() -> GridStore {
        let mut grid = GridStore::new();
        grid.set_dimensions(2, 1);
        grid
    }

    #[test]
    fn open_seeds_from_empty_cell() {
        let grid = grid_2x1();
        let mut session = EditSession::new();
        session.open(&grid, 1);
        assert!(session.is_open());
        assert_eq!(session.target(), Some(1));
        assert_eq!(session.icon(), None);
        assert_eq!(session.command(), "");
        assert_eq!(session.args(), "");
    }

    #[test]
    fn open_joins_stored_args() {
        let mut grid = grid_2x1();
        grid.set_cell(
            0,
            Cell {
                icon: Some("data:image/png;base64,AA==".into()),
                command: Some("git".into()),
                args: Some(vec!["commit".into(), "-m".into(), "wip".into()]),
            },
        );
        let mut session = EditSession::new();
        session.open(&grid, 0);
        assert_eq!(session.icon(), Some("data:image/png;base64,AA=="));
        assert_eq!(session.command(), "git");
        assert_eq!(session.args(), "commit -m wip");
    }

    #[test]
    fn cancel_leaves_cell_unchanged() {
        let mut grid = grid_2x1();
        let original = Cell { command: Some("ls".into()), args: Some(vec!["-la".into()]), icon: None };
        grid.set_cell(0, original.clone());

        let mut session = EditSession::new();
        session.open(&grid, 0);
        session.update_command("rm");
        session.update_args("-rf /");
        session.update_icon(Some("data:x,y".into()));
        let ticket = session.cancel().unwrap();
        assert!(session.finish_close(ticket));

        assert_eq!(*grid.get_cell(0), original);
        assert_eq!(session.phase(), SessionPhase::Closed);
        assert_eq!(session.target(), None);
    }

    #[test]
    fn save_commits_staged_values() {
        let mut grid = grid_2x1();
        let mut session = EditSession::new();
        session.open(&grid, 1);
        session.update_icon(Some("data:image/png;base64,AA==".into()));
        session.update_command("echo");
        session.update_args("hello world");
        let ticket = session.save(&mut grid).unwrap();

        assert_eq!(
            *grid.get_cell(1),
            Cell {
                icon: Some("data:image/png;base64,AA==".into()),
                command: Some("echo".into()),
                args: Some(vec!["hello".into(), "world".into()]),
            }
        );
        assert!(grid.get_cell(0).is_empty());
        assert!(session.is_closing());
        assert!(session.finish_close(ticket));
        assert!(!session.is_visible());
    }

    #[test]
    fn save_with_empty_fields_keeps_empty_command_and_one_empty_arg() {
        let mut grid = grid_2x1();
        let mut session = EditSession::new();
        session.open(&grid, 0);
        session.update_args("");
        session.save(&mut grid).unwrap();

        let cell = grid.get_cell(0);
        assert_eq!(cell.command.as_deref(), Some(""));
        assert_eq!(cell.args, Some(vec![String::new()]));
    }

    #[test]
    fn closing_phase_keeps_staged_values_visible() {
        let grid = grid_2x1();
        let mut session = EditSession::new();
        session.open(&grid, 0);
        session.update_command("ls");
        session.cancel().unwrap();
        assert!(session.is_visible());
        assert_eq!(session.command(), "ls");
        assert_eq!(session.target(), Some(0));
    }

    #[test]
    fn reopen_before_close_fires_suppresses_stale_reset() {
        let grid = grid_2x1();
        let mut session = EditSession::new();
        session.open(&grid, 0);
        let stale = session.cancel().unwrap();

        session.open(&grid, 1);
        session.update_command("new");
        assert!(!session.finish_close(stale));
        assert!(session.is_open());
        assert_eq!(session.target(), Some(1));
        assert_eq!(session.command(), "new");
    }

    #[test]
    fn save_and_cancel_require_open_session() {
        let mut grid = grid_2x1();
        let mut session = EditSession::new();
        assert!(session.save(&mut grid).is_none());
        assert!(session.cancel().is_none());

        session.open(&grid, 0);
        session.cancel().unwrap();
        session.update_command("late");
        assert!(session.save(&mut grid).is_none());
        assert!(session.cancel().is_none());
        assert!(grid.get_cell(0).is_empty());
    }

    #[test]
    fn accepts_only_current_open_generation() {
        let grid = grid_2x1();
        let mut session = EditSession::new();
        session.open(&grid, 0);
        let first = session.generation();
        assert!(session.accepts(first));
        session.open(&grid, 1);
        assert!(!session.accepts(first));
        let second = session.generation();
        session.cancel();
        assert!(!session.accepts(second));
    }

    #[test]
    fn split_args_mirrors_typed_spacing() {
        assert_eq!(split_args("-la"), vec!["-la"]);
        assert_eq!(split_args("a b"), vec!["a", "b"]);
        assert_eq!(split_args("a  b"), vec!["a", "", "b"]);
        assert_eq!(split_args(""), vec![""]);
        assert_eq!(split_args("x\t"), vec!["x"]);
    }
}
