//! Application window state and its event handlers.
//!
//! Both front ends own one `Session` and call these handlers in the order
//! the user triggers them. Every failure is caught here and turned into a
//! `Notification`; nothing propagates past a handler.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::engine::{FitSummary, Figure, RegressionEngine};
use crate::error::RegressionError;

pub const LOAD_TITLE: &str = "Loading a CSV";
pub const CALCULATE_TITLE: &str = "Regression";
pub const PREDICT_TITLE: &str = "Prediction";

pub const LOAD_OK: &str = "CSV Loaded Successfully";
pub const LOAD_FAILED: &str = "Loading Failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

/// A titled message shown to the user as a modal dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn info(title: &str, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn error(title: &str, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

/// Coarse window state, derived from the stored path and the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    NoFile,
    FileLoaded,
    Fitted,
}

impl std::fmt::Display for WindowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WindowState::NoFile => "no file loaded",
            WindowState::FileLoaded => "file loaded",
            WindowState::Fitted => "fit complete",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Default)]
pub struct Session {
    file_path: Option<PathBuf>,
    engine: RegressionEngine,
    figure: Figure,
    last_fit: Option<FitSummary>,
    last_fit_at: Option<DateTime<Local>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `path` only if its file name ends in `.csv` (case-sensitive).
    ///
    /// `None` is a cancelled picker and counts as a failed load. A rejected
    /// path never replaces the stored one.
    pub fn select_file(&mut self, path: Option<PathBuf>) -> Notification {
        match path {
            Some(path) if is_csv_path(&path) => {
                info!(path = %path.display(), "csv selected");
                self.file_path = Some(path);
                Notification::info(LOAD_TITLE, LOAD_OK)
            }
            Some(path) => {
                let err = RegressionError::InvalidFileSelection { path };
                warn!(error = %err, "file rejected");
                Notification::error(LOAD_TITLE, LOAD_FAILED)
            }
            None => {
                warn!("file selection cancelled");
                Notification::error(LOAD_TITLE, LOAD_FAILED)
            }
        }
    }

    /// Fit with the label text as typed, then redraw.
    ///
    /// Returns a notification only when something went wrong; the redrawn
    /// figure is the success feedback.
    pub fn calculate(&mut self, x_text: &str, y_text: &str) -> Option<Notification> {
        let result = match &self.file_path {
            Some(path) => self.engine.load(x_text, y_text, path),
            None => Err(RegressionError::NoFileSelected),
        };
        self.figure = self.engine.render();

        match result {
            Ok(summary) => {
                self.last_fit = Some(summary);
                self.last_fit_at = Some(Local::now());
                None
            }
            Err(err) => {
                warn!(error = %err, "calculate failed");
                Some(Notification::error(CALCULATE_TITLE, err.to_string()))
            }
        }
    }

    /// Parse `text` as an integer and report the rounded prediction.
    pub fn predict(&self, text: &str) -> Notification {
        match self.try_predict(text) {
            Ok(value) => Notification::info(PREDICT_TITLE, format!("{:.2}", value)),
            Err(err) => {
                warn!(error = %err, "prediction failed");
                Notification::error(PREDICT_TITLE, err.to_string())
            }
        }
    }

    pub fn try_predict(&self, text: &str) -> Result<f64, RegressionError> {
        let x: i64 = text
            .trim()
            .parse()
            .map_err(|_| RegressionError::InvalidPredictionInput {
                input: text.to_string(),
            })?;
        self.engine.predict(x as f64)
    }

    pub fn state(&self) -> WindowState {
        match (&self.file_path, self.engine.is_fitted()) {
            (_, true) => WindowState::Fitted,
            (Some(_), false) => WindowState::FileLoaded,
            (None, false) => WindowState::NoFile,
        }
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn engine(&self) -> &RegressionEngine {
        &self.engine
    }

    pub fn last_fit(&self) -> Option<&FitSummary> {
        self.last_fit.as_ref()
    }

    pub fn last_fit_at(&self) -> Option<DateTime<Local>> {
        self.last_fit_at
    }
}

/// The file name's text after its last `.` must be exactly `csv`.
pub fn is_csv_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        == Some("csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_extension_is_case_sensitive() {
        assert!(is_csv_path(Path::new("/tmp/data.csv")));
        assert!(is_csv_path(Path::new("archive.tar.csv")));
        assert!(!is_csv_path(Path::new("/tmp/data.CSV")));
        assert!(!is_csv_path(Path::new("/tmp/data.csv.bak")));
        assert!(!is_csv_path(Path::new("/tmp/csv")));
        assert!(is_csv_path(Path::new("/tmp/.csv")));
    }

    #[test]
    fn fresh_session_has_no_file() {
        let session = Session::new();
        assert_eq!(session.state(), WindowState::NoFile);
        assert!(session.figure().is_placeholder());
    }
}
