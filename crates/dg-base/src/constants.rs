// =============================================================================
// EXPORT
// =============================================================================

/// Prefix of every button key in an exported document (`/default/<idx>`).
pub const BUTTON_KEY_PREFIX: &str = "/default";

/// Default file name for the exported document.
pub const EXPORT_FILE_NAME: &str = "config.json";

// =============================================================================
// GRID
// =============================================================================

/// Upper bound applied when coercing user-typed dimensions.
pub const MAX_DIMENSION: usize = 64;

// =============================================================================
// EDIT SESSION
// =============================================================================

/// Length of the closing phase before a session's staged state is reset (ms).
pub const CLOSE_DELAY_MS: u64 = 300;

// =============================================================================
// EVENT LOOP
// =============================================================================

/// Poll interval for terminal events in milliseconds
pub const EVENT_POLL_MS: u64 = 16;

// =============================================================================
// UI LAYOUT
// =============================================================================

/// Height of the controls bar (inputs and buttons)
pub const CONTROLS_HEIGHT: u16 = 3;

/// Height of the status bar
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width of the edit modal
pub const MODAL_WIDTH: u16 = 60;

/// Height of the edit modal
pub const MODAL_HEIGHT: u16 = 15;

// =============================================================================
// PERSISTENCE
// =============================================================================

/// Directory for logs and crash reports
pub const STORE_DIR: &str = "./.deckgen";

/// Log file name inside STORE_DIR
pub const LOG_FILE: &str = "deckgen.log";

/// Crash report subdirectory inside STORE_DIR
pub const ERRORS_DIR: &str = "errors";
