//! Merge a directory of icon files into an existing document.
//!
//! `<dir>/default/3.png` becomes the icon of key `/default/3`. Existing
//! entries keep their command and args; unknown keys are appended with only
//! an icon.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use dg_base::{ButtonConfig, DeckError};

use crate::document::ConfigDocument;
use crate::icon::encode_base64;

/// Outcome of a merge, for reporting.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub updated: usize,
    pub added: usize,
    pub skipped: Vec<String>,
}

/// Every regular file under `dir`, recursively, hidden entries skipped,
/// in sorted path order.
pub fn collect_icon_paths(dir: &Path) -> Result<Vec<PathBuf>, DeckError> {
    if !dir.is_dir() {
        return Err(DeckError::NotADirectory(dir.display().to_string()));
    }

    let mut paths: Vec<PathBuf> = WalkBuilder::new(dir)
        .hidden(true)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .ignore(false)
        .parents(false)
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .collect();
    paths.sort();
    Ok(paths)
}

/// Key for an icon file: `/` + path relative to `dir`, extension dropped,
/// `/` separators on every platform.
pub fn icon_key(dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(dir).unwrap_or(path).with_extension("");
    let parts: Vec<String> = relative.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect();
    format!("/{}", parts.join("/"))
}

/// Merge every icon under `dir` into `doc`.
pub fn merge_icon_dir(doc: &mut ConfigDocument, dir: &Path) -> Result<MergeReport, DeckError> {
    let mut report = MergeReport::default();

    for path in collect_icon_paths(dir)? {
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("failed to read icon {}: {}", path.display(), e);
                report.skipped.push(path.display().to_string());
                continue;
            }
        };
        let key = icon_key(dir, &path);
        let encoded = encode_base64(&bytes);

        match doc.buttons.get_mut(&key) {
            Some(button) => {
                button.icon = Some(encoded);
                report.updated += 1;
            }
            None => {
                doc.buttons.insert(key, ButtonConfig { command: None, args: None, icon: Some(encoded) });
                report.added += 1;
            }
        }
    }

    log::info!("icons merged from {}: {} updated, {} added", dir.display(), report.updated, report.added);
    Ok(report)
}

/// Read the document at `config`, merge `dir` into it, write it back.
pub fn write_icons_to_config(dir: &Path, config: &Path) -> Result<MergeReport, DeckError> {
    let mut doc = ConfigDocument::read_from(config)?;
    let report = merge_icon_dir(&mut doc, dir)?;
    doc.write_to(config)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let icons = tmp.path().join("icons");
        fs::create_dir_all(icons.join("default")).unwrap();
        fs::write(icons.join("default").join("0.png"), b"zero").unwrap();
        fs::write(icons.join("default").join("5.png"), b"five").unwrap();
        fs::write(icons.join(".DS_Store"), b"junk").unwrap();
        (tmp, icons)
    }

    #[test]
    fn keys_are_relative_paths_without_extension() {
        let dir = Path::new("icons");
        assert_eq!(icon_key(dir, Path::new("icons/default/3.png")), "/default/3");
        assert_eq!(icon_key(dir, Path::new("icons/status.jpg")), "/status");
    }

    #[test]
    fn hidden_files_are_skipped() {
        let (_tmp, icons) = setup();
        let paths = collect_icon_paths(&icons).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| !p.to_string_lossy().contains(".DS_Store")));
    }

    #[test]
    fn merge_updates_existing_and_appends_new() {
        let (tmp, icons) = setup();
        let config = tmp.path().join("config.json");
        fs::write(
            &config,
            json!({ "buttons": { "/default/0": { "command": "ls", "args": ["-la"], "icon": null } } }).to_string(),
        )
        .unwrap();

        let report = write_icons_to_config(&icons, &config).unwrap();
        assert_eq!(report, MergeReport { updated: 1, added: 1, skipped: vec![] });

        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&config).unwrap()).unwrap();
        assert_eq!(
            written,
            json!({ "buttons": {
                "/default/0": { "command": "ls", "args": ["-la"], "icon": encode_base64(b"zero") },
                "/default/5": { "command": null, "args": null, "icon": encode_base64(b"five") }
            } })
        );
    }

    #[test]
    fn merge_into_null_buttons() {
        let (tmp, icons) = setup();
        let config = tmp.path().join("config.json");
        fs::write(&config, r#"{"buttons": null, "status": null}"#).unwrap();

        let report = write_icons_to_config(&icons, &config).unwrap();
        assert_eq!(report, MergeReport { updated: 0, added: 2, skipped: vec![] });

        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&config).unwrap()).unwrap();
        assert_eq!(
            written,
            json!({
                "buttons": {
                    "/default/0": { "command": null, "args": null, "icon": encode_base64(b"zero") },
                    "/default/5": { "command": null, "args": null, "icon": encode_base64(b"five") }
                },
                "status": null
            })
        );
    }

    #[test]
    fn not_a_directory_is_reported() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.png");
        fs::write(&file, b"x").unwrap();
        let err = collect_icon_paths(&file).unwrap_err();
        assert!(matches!(err, DeckError::NotADirectory(_)));
    }

    #[test]
    fn missing_config_fails_before_touching_anything() {
        let (tmp, icons) = setup();
        let config = tmp.path().join("absent.json");
        assert!(write_icons_to_config(&icons, &config).is_err());
        assert!(!config.exists());
    }
}
