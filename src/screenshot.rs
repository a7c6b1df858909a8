use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Local};
use log::{error, info};
use ratatui::buffer::Buffer;

/// Writes rendered frames as text files into one folder.
pub struct Screenshots {
    dir: PathBuf,
}

impl Screenshots {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Screenshots { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Millisecond resolution keeps captures taken in the same second apart.
    pub fn file_name(taken_at: DateTime<Local>) -> String {
        format!("Screenshot_{}.txt", taken_at.format("%Y-%m-%d_%H-%M-%S-%3f"))
    }

    pub fn capture(&self, buffer: &Buffer, taken_at: DateTime<Local>) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(Self::file_name(taken_at));
        fs::write(&path, buffer_to_text(buffer))?;
        Ok(path)
    }

    /// Captures `buffer`, logging instead of failing.
    pub fn save(&self, buffer: &Buffer) {
        match self.capture(buffer, Local::now()) {
            Ok(path) => info!("Saved screenshot to {}", path.display()),
            Err(e) => error!("Error saving screenshot: {}", e),
        }
    }

    /// Opens the screenshot folder in the platform's file browser.
    pub fn open_folder(&self) {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            error!("Error creating {}: {}", self.dir.display(), e);
            return;
        }

        let opener = if cfg!(target_os = "windows") {
            "explorer"
        } else if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        };
        match Command::new(opener).arg(&self.dir).spawn() {
            Ok(_) => info!("Opened {}", self.dir.display()),
            Err(e) => error!("Error opening {} with {}: {}", self.dir.display(), opener, e),
        }
    }
}

/// Buffer contents as plain text, one line per row.
pub fn buffer_to_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut text = String::with_capacity((area.width as usize + 1) * area.height as usize);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}
