use std::io::{self, Write};
use std::path::Path;

use crossterm::{
    ExecutableCommand,
    event::{DisableBracketedPaste, DisableMouseCapture},
    terminal::{LeaveAlternateScreen, disable_raw_mode},
};

use dg_base::constants::{ERRORS_DIR, STORE_DIR};

/// Restore the terminal and append the panic to `.deckgen/errors/panic.log`
/// before the default hook prints it. Without this a panic leaves the
/// terminal in raw mode on the alternate screen and the message is lost.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();

        let error_dir = Path::new(STORE_DIR).join(ERRORS_DIR);
        let _ = std::fs::create_dir_all(&error_dir);
        let ts = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S");
        let backtrace = std::backtrace::Backtrace::force_capture();
        let msg = format!("[{}] {}\n\n{}\n\n---\n", ts, info, backtrace);
        let _ = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(error_dir.join("panic.log"))
            .and_then(|mut f| f.write_all(msg.as_bytes()));
        log::error!("panic: {}", info);

        default_hook(info);
    }));
}

/// Leave raw mode, the alternate screen, mouse capture and bracketed paste.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = io::stdout().execute(DisableMouseCapture);
    let _ = io::stdout().execute(DisableBracketedPaste);
    let _ = io::stdout().execute(LeaveAlternateScreen);
}
