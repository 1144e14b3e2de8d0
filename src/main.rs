mod app;
mod cli;
mod infra;
mod state;
mod ui;

use std::io;

use clap::Parser;
use crossterm::{
    ExecutableCommand,
    event::{EnableBracketedPaste, EnableMouseCapture},
    terminal::{EnterAlternateScreen, enable_raw_mode},
};
use ratatui::prelude::*;

use app::App;
use app::actions::{Action, apply_action};
use cli::{Cli, Commands};
use dg_base::config::set_active_theme;
use dg_mod_export::write_icons_to_config;
use infra::panic::{install_panic_hook, restore_terminal};
use state::State;

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // stdout belongs to the UI, so logging goes to a file. A logger that
    // cannot open its file is not fatal.
    if let Err(e) = infra::logger::init(&cli.log_path(), cli.level()) {
        eprintln!("deckgen: logging disabled: {}", e);
    }
    log::info!("deckgen {} starting", env!("CARGO_PKG_VERSION"));

    if let Some(Commands::Icons { icons_dir, config }) = &cli.command {
        return run_icons(icons_dir, config);
    }

    set_active_theme(&cli.theme);
    install_panic_hook();

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableBracketedPaste)?;
    io::stdout().execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(initial_state(&cli));
    let result = app.run(&mut terminal);

    // Cleanup
    restore_terminal();
    if let Err(e) = &result {
        log::error!("event loop failed: {}", e);
    }
    log::info!("deckgen exiting");
    result
}

/// Fresh editor state, with a grid already generated when `--rows` and
/// `--cols` were given.
fn initial_state(cli: &Cli) -> State {
    let mut state = State::new(cli.output.clone());
    if cli.rows.is_some() || cli.cols.is_some() {
        state.rows_input = cli.rows.clone().unwrap_or_else(|| String::from("0"));
        state.cols_input = cli.cols.clone().unwrap_or_else(|| String::from("0"));
        apply_action(&mut state, Action::GenerateGrid, app::now_ms());
    }
    state
}

/// `deckgen icons`: merge an icon directory into a document on disk.
fn run_icons(icons_dir: &std::path::Path, config: &std::path::Path) -> io::Result<()> {
    match write_icons_to_config(icons_dir, config) {
        Ok(report) => {
            println!(
                "{}: {} updated, {} added, {} skipped",
                config.display(),
                report.updated,
                report.added,
                report.skipped.len()
            );
            for path in &report.skipped {
                println!("  skipped {}", path);
            }
            Ok(())
        }
        Err(e) => {
            log::error!("icons merge failed: {}", e);
            eprintln!("deckgen icons: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_grid_from_flags() {
        let cli = Cli::try_parse_from(["deckgen", "--rows", "2", "--cols", "3.9"]).unwrap();
        let state = initial_state(&cli);
        assert_eq!((state.grid.rows(), state.grid.cols()), (2, 3));
        assert_eq!(state.grid.len(), 6);
    }

    #[test]
    fn no_flags_means_empty_grid() {
        let cli = Cli::try_parse_from(["deckgen"]).unwrap();
        let state = initial_state(&cli);
        assert!(state.grid.is_empty());
        assert_eq!(state.output_path, std::path::PathBuf::from("config.json"));
    }
}
