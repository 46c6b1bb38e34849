use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::Local;

/// Append-only session log: one `[YYYY-MM-DD HH:MM:SS] message` per line.
///
/// Writes are best-effort; a monitor keeps sampling even when its log sink
/// is gone (disk full, file removed from under us). A disabled logbook
/// swallows every record.
pub struct Logbook {
    file: Option<File>,
}

impl Logbook {
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file: Some(file) })
    }

    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    pub fn record(&mut self, message: &str) {
        if let Some(file) = self.file.as_mut() {
            let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            let _ = writeln!(file, "[{stamp}] {message}");
            let _ = file.flush();
        }
    }
}
