//! Background icon reads. Each request runs on its own thread and reports
//! back over a channel; the event loop decides whether the result still
//! applies.

use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread;

use dg_base::DeckError;
use dg_mod_export::read_icon_data_uri;

#[derive(Debug)]
pub struct IconLoaded {
    /// Session generation that asked for the icon
    pub generation: u64,
    /// Id of this read; see `State::icon_loading`
    pub request: u64,
    pub path: PathBuf,
    pub result: Result<String, DeckError>,
}

pub fn spawn_icon_read(path: PathBuf, generation: u64, request: u64, tx: Sender<IconLoaded>) {
    log::info!("icon read {} started: {} (session {})", request, path.display(), generation);
    thread::spawn(move || {
        let result = read_icon_data_uri(&path);
        let _ = tx.send(IconLoaded { generation, request, path, result });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::mpsc;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn read_result_arrives_on_channel() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.png");
        fs::write(&path, b"ABC").unwrap();

        let (tx, rx) = mpsc::channel();
        spawn_icon_read(path.clone(), 7, 3, tx);
        let loaded = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(loaded.generation, 7);
        assert_eq!(loaded.request, 3);
        assert_eq!(loaded.path, path);
        assert_eq!(loaded.result.unwrap(), "data:image/png;base64,QUJD");
    }

    #[test]
    fn missing_file_reports_error() {
        let (tx, rx) = mpsc::channel();
        spawn_icon_read(PathBuf::from("/definitely/not/here.png"), 1, 1, tx);
        assert!(rx.recv_timeout(Duration::from_secs(5)).unwrap().result.is_err());
    }
}
