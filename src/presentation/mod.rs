pub mod app;
pub mod config;

pub use app::{BootstrapError, build_cue_sources, build_soundscape_service};
pub use config::{Environment, ScaffoldConfig, Settings, SettingsError};
