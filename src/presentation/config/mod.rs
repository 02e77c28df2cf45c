mod environment;
mod scaffold_config;
mod settings;

pub use environment::Environment;
pub use scaffold_config::ScaffoldConfig;
pub use settings::{
    ExecutionModeSetting, GainSettings, LlmProvider, LlmSettings, LoggingSettings,
    ReadingSettings, RenderProvider, RenderSettings, Settings, SettingsError, SourceKind,
    SourceSettings, TimingSettings,
};
