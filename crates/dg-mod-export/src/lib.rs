//! Turning a grid into a config document, and the file edges around it.
//!
//! - `exporter` — grid to `ConfigDocument` (empty cells omitted, icon prefixes stripped)
//! - `document` — the document type, its ordered button map, and disk I/O
//! - `icon` — image files to data URIs
//! - `merge` — folding a directory of icons into an existing document

pub mod document;
pub mod exporter;
pub mod icon;
pub mod merge;

pub use document::{ButtonMap, ConfigDocument};
pub use exporter::{button_key, export, strip_data_uri_prefix};
pub use icon::{encode_data_uri, read_icon_data_uri};
pub use merge::{MergeReport, write_icons_to_config};
