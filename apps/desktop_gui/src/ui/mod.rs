//! UI layer for the desktop auditor: app shell and the report trace panels.

pub mod app;
pub mod report_panel;

pub use app::{DesktopGuiApp, PersistedDesktopSettings, StartupConfig, SETTINGS_STORAGE_KEY};
