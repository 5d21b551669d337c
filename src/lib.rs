//! Regression calculator: load a CSV, fit y on x with ordinary least
//! squares, plot the result and predict new values.

pub mod dataset;
pub mod engine;
pub mod error;
pub mod session;

// Export the CLI handlers for tests to use
#[cfg(feature = "cli_app")]
pub mod cli_app;

pub use engine::{ColumnSelection, Figure, FitSummary, FittedModel, RegressionEngine};
pub use error::{RegressionError, Result};
pub use session::{Notification, NotificationKind, Session, WindowState};
