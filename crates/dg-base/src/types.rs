//! Button data shared by the grid, the edit session and the exporter.

use serde::{Deserialize, Serialize};

/// One grid position.
///
/// `None` means "unset". A saved cell always carries `Some(command)`, even
/// when the command is empty, because the edit session stores its text
/// field as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Image payload, usually a `data:<mime>;base64,...` URI.
    pub icon: Option<String>,
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
}

impl Cell {
    /// True when the cell has nothing worth exporting: no icon, no command
    /// text, and no argument tokens. A single empty-string token still
    /// counts as an argument.
    pub fn is_empty(&self) -> bool {
        self.icon.as_deref().is_none_or(str::is_empty)
            && self.command.as_deref().is_none_or(str::is_empty)
            && self.args.as_ref().is_none_or(Vec::is_empty)
    }
}

/// A button entry in an exported document.
///
/// Fields serialize as `null` when absent, never skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonConfig {
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
    /// Bare base64 payload (no data-URI prefix).
    pub icon: Option<String>,
}
