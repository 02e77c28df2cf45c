use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use config::{Config, File};
use config::Environment as EnvironmentSource;
use serde::Deserialize;

use crate::application::services::{ChannelGains, DispatchPolicy, ExecutionMode, TimingPolicy};
use crate::domain::{GainModifiers, ReadingSpeed};

use super::Environment;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("environment: {0}")]
    Environment(String),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Layered settings: built-in defaults, then `appsettings.{env}.toml`, then
/// `APP__SECTION__KEY` variables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub reading: ReadingSettings,
    pub timing: TimingSettings,
    pub gain: GainSettings,
    pub llm: LlmSettings,
    pub sources: SourceSettings,
    pub render: RenderSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReadingSettings {
    pub speed_wps: f64,
}

impl Default for ReadingSettings {
    fn default() -> Self {
        Self {
            speed_wps: ReadingSpeed::DEFAULT_WPS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    pub sfx_default_ms: u64,
    pub music_default_ms: u64,
    pub min_duration_ms: u64,
    pub default_fade_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        let policy = TimingPolicy::default();
        Self {
            sfx_default_ms: policy.sfx_default_ms,
            music_default_ms: policy.music_default_ms,
            min_duration_ms: policy.min_duration_ms,
            default_fade_ms: policy.default_fade_ms,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GainSettings {
    /// Modifier word to dB offset. Replaces the built-in vocabulary when set.
    pub modifiers: HashMap<String, f32>,
    pub window: usize,
}

impl Default for GainSettings {
    fn default() -> Self {
        Self {
            modifiers: HashMap::new(),
            window: GainModifiers::DEFAULT_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[serde(rename = "openai")]
    OpenAi,
    #[default]
    Gemini,
    None,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            base_url: None,
            timeout_secs: 60,
        }
    }
}

impl LlmSettings {
    /// Configured key, else the provider's conventional variable.
    pub fn resolved_api_key(&self) -> Option<String> {
        let fallback_vars: &[&str] = match self.provider {
            LlmProvider::OpenAi => &["OPENAI_API_KEY"],
            LlmProvider::Gemini => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
            LlmProvider::None => &[],
        };
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| {
                fallback_vars
                    .iter()
                    .find_map(|var| std::env::var(var).ok().filter(|k| !k.is_empty()))
            })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Llm,
    Keyword,
    Lexical,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub order: Vec<SourceKind>,
    pub narration: bool,
    pub pos_tagging: bool,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            order: vec![SourceKind::Llm, SourceKind::Keyword, SourceKind::Lexical],
            narration: false,
            pos_tagging: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderProvider {
    #[default]
    Remote,
    Mock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionModeSetting {
    #[default]
    Sequential,
    Parallel,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub provider: RenderProvider,
    pub mode: ExecutionModeSetting,
    pub workers: usize,
    pub timeout_secs: u64,
    pub sample_rate: u32,
    pub steps: u32,
    pub audio_endpoints: Vec<String>,
    pub speech_endpoint: String,
    pub mock_delay_ms: u64,
    pub sfx_gain: f32,
    pub ambience_gain: f32,
    pub music_gain: f32,
    pub narrator_gain: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        let gains = ChannelGains::default();
        Self {
            provider: RenderProvider::default(),
            mode: ExecutionModeSetting::default(),
            workers: 2,
            timeout_secs: 300,
            sample_rate: 44_100,
            steps: 48,
            audio_endpoints: vec!["http://localhost:8001".to_string()],
            speech_endpoint: "http://localhost:8002".to_string(),
            mock_delay_ms: 0,
            sfx_gain: gains.sfx,
            ambience_gain: gains.ambience,
            music_gain: gains.music,
            narrator_gain: gains.narrator,
        }
    }
}

impl RenderSettings {
    pub fn execution_mode(&self) -> ExecutionMode {
        match self.mode {
            ExecutionModeSetting::Sequential => ExecutionMode::Sequential,
            ExecutionModeSetting::Parallel => ExecutionMode::Parallel {
                workers: self.workers,
            },
        }
    }

    pub fn channel_gains(&self) -> ChannelGains {
        ChannelGains {
            sfx: self.sfx_gain,
            ambience: self.ambience_gain,
            music: self.music_gain,
            narrator: self.narrator_gain,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Loads `.env`, then settings for the environment named by
    /// `APP_ENVIRONMENT` from the working directory.
    pub fn load() -> Result<(Self, Environment), SettingsError> {
        dotenvy::dotenv().ok();
        let environment = Environment::from_env().map_err(SettingsError::Environment)?;
        let settings = Self::load_from(environment, Path::new("."))?;
        Ok((settings, environment))
    }

    pub fn load_from(environment: Environment, config_dir: &Path) -> Result<Self, SettingsError> {
        let file = config_dir.join(environment.settings_file_stem());

        let settings: Settings = Config::builder()
            .add_source(File::with_name(&file.to_string_lossy()).required(false))
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.reading.speed_wps.is_finite() && self.reading.speed_wps > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "reading.speed_wps must be positive, got {}",
                self.reading.speed_wps
            )));
        }
        if self.render.workers == 0 {
            return Err(SettingsError::Invalid(
                "render.workers must be at least 1".to_string(),
            ));
        }
        if self.render.sample_rate == 0 {
            return Err(SettingsError::Invalid(
                "render.sample_rate must be positive".to_string(),
            ));
        }
        if self.render.timeout_secs == 0 {
            return Err(SettingsError::Invalid(
                "render.timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn reading_speed(&self) -> Result<ReadingSpeed, SettingsError> {
        ReadingSpeed::new(self.reading.speed_wps).map_err(|e| SettingsError::Invalid(e.to_string()))
    }

    pub fn timing_policy(&self) -> TimingPolicy {
        TimingPolicy {
            sfx_default_ms: self.timing.sfx_default_ms,
            music_default_ms: self.timing.music_default_ms,
            min_duration_ms: self.timing.min_duration_ms,
            default_fade_ms: self.timing.default_fade_ms,
        }
    }

    pub fn gain_modifiers(&self) -> GainModifiers {
        if self.gain.modifiers.is_empty() {
            let defaults = GainModifiers::default();
            return GainModifiers::new(defaults.offsets().clone(), self.gain.window);
        }
        GainModifiers::new(self.gain.modifiers.clone(), self.gain.window)
    }

    pub fn dispatch_policy(&self) -> DispatchPolicy {
        DispatchPolicy {
            mode: self.render.execution_mode(),
            render_timeout: Duration::from_secs(self.render.timeout_secs),
            channel_gains: self.render.channel_gains(),
        }
    }
}
