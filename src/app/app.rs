use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crossterm::event::{self, Event};
use ratatui::prelude::*;

use dg_base::DeckError;
use dg_base::constants::EVENT_POLL_MS;
use dg_mod_export::export;

use crate::app::actions::{Action, ActionResult, apply_action, process_due_closes};
use crate::app::events::handle_event;
use crate::app::now_ms;
use crate::infra::icon_loader::{IconLoaded, spawn_icon_read};
use crate::state::{State, StatusKind};
use crate::ui;

/// Poll interval while nothing time-based is pending
const IDLE_POLL_MS: u64 = 50;

pub struct App {
    pub state: State,
    icon_tx: Sender<IconLoaded>,
    icon_rx: Receiver<IconLoaded>,
}

impl App {
    pub fn new(state: State) -> Self {
        let (icon_tx, icon_rx) = mpsc::channel();
        Self { state, icon_tx, icon_rx }
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        loop {
            // === INPUT ===
            let poll_ms = if self.has_pending_work() { EVENT_POLL_MS } else { IDLE_POLL_MS };
            if event::poll(Duration::from_millis(poll_ms))? {
                let evt = event::read()?;
                let Some(action) = handle_event(&evt, &self.state) else {
                    log::info!("quit requested");
                    break;
                };
                if action != Action::None || matches!(evt, Event::Resize(..)) {
                    self.state.dirty = true;
                }
                self.handle_action(action);
            }

            // === BACKGROUND ===
            self.process_icon_results();
            if process_due_closes(&mut self.state, now_ms()) {
                self.state.dirty = true;
            }

            if self.state.dirty {
                terminal.draw(|frame| ui::render(frame, &mut self.state))?;
                self.state.dirty = false;
            }
        }

        log::logger().flush();
        Ok(())
    }

    fn has_pending_work(&self) -> bool {
        !self.state.closes.is_empty() || self.state.icon_loading.is_some()
    }

    fn handle_action(&mut self, action: Action) {
        match apply_action(&mut self.state, action, now_ms()) {
            ActionResult::Nothing => {}
            ActionResult::LoadIcon { path, generation, request } => {
                spawn_icon_read(path, generation, request, self.icon_tx.clone());
            }
            ActionResult::WriteExport => {
                let result = write_export(&self.state);
                report_export(&mut self.state, result);
            }
        }
    }

    fn process_icon_results(&mut self) {
        while let Ok(loaded) = self.icon_rx.try_recv() {
            apply_icon_loaded(&mut self.state, loaded);
            self.state.dirty = true;
        }
    }
}

/// Export the grid and write it to the output path. Returns the number of
/// buttons written.
pub fn write_export(state: &State) -> Result<usize, DeckError> {
    let doc = export(&state.grid);
    doc.write_to(&state.output_path)?;
    log::info!("export written: {} ({} buttons)", state.output_path.display(), doc.buttons.len());
    Ok(doc.buttons.len())
}

fn report_export(state: &mut State, result: Result<usize, DeckError>) {
    match result {
        Ok(count) => {
            let msg = format!("Wrote {} button(s) to {}", count, state.output_path.display());
            state.set_status(StatusKind::Success, msg);
        }
        Err(e) => {
            log::error!("export failed: {}", e);
            state.set_status(StatusKind::Error, e.to_string());
        }
    }
}

/// Stage a finished icon read, unless the session that asked for it has
/// since been closed or replaced, or a later icon edit superseded the read.
/// Returns true if the icon was applied.
pub fn apply_icon_loaded(state: &mut State, loaded: IconLoaded) -> bool {
    if !state.session.accepts(loaded.generation) {
        log::info!("icon read {} dropped: session {} is gone", loaded.request, loaded.generation);
        return false;
    }
    if state.icon_loading != Some(loaded.request) {
        log::info!("icon read {} dropped: superseded", loaded.request);
        return false;
    }
    state.icon_loading = None;
    match loaded.result {
        Ok(data_uri) => {
            log::info!("icon applied: {} ({} bytes encoded)", loaded.path.display(), data_uri.len());
            state.session.update_icon(Some(data_uri));
            state.set_status(StatusKind::Success, format!("Loaded {}", loaded.path.display()));
            true
        }
        Err(e) => {
            log::warn!("icon read failed: {}", e);
            state.set_status(StatusKind::Error, e.to_string());
            false
        }
    }
}
