use dg_base::constants::BUTTON_KEY_PREFIX;
use dg_base::{ButtonConfig, Cell};
use dg_mod_grid::GridStore;

use crate::document::{ButtonMap, ConfigDocument};

/// Document key for the cell at `idx`.
pub fn button_key(idx: usize) -> String {
    format!("{}/{}", BUTTON_KEY_PREFIX, idx)
}

/// Drop a data-URI header (`data:image/png;base64,`) by cutting through the
/// first comma. A payload without a comma is already bare and comes back as-is.
pub fn strip_data_uri_prefix(icon: &str) -> &str {
    match icon.split_once(',') {
        Some((_, payload)) => payload,
        None => icon,
    }
}

fn to_button(cell: &Cell) -> ButtonConfig {
    ButtonConfig {
        command: cell.command.clone(),
        args: cell.args.clone(),
        icon: cell.icon.as_deref().map(|icon| strip_data_uri_prefix(icon).to_string()),
    }
}

/// Build the document for the current grid. Empty cells are omitted;
/// entries appear in increasing index order.
pub fn export(grid: &GridStore) -> ConfigDocument {
    let mut buttons = ButtonMap::new();
    for (idx, cell) in grid.cells().iter().enumerate() {
        if !cell.is_empty() {
            buttons.insert(button_key(idx), to_button(cell));
        }
    }
    log::debug!("exported {} of {} cells", buttons.len(), grid.len());
    ConfigDocument { buttons, extra: serde_json::Map::new() }
}
