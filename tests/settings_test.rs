use std::fs;
use std::time::Duration;

use storyscore::application::ports::CueSource;
use storyscore::application::services::ExecutionMode;
use storyscore::presentation::config::{
    Environment, LlmProvider, RenderProvider, ScaffoldConfig, Settings, SettingsError, SourceKind,
};
use storyscore::presentation::{build_cue_sources, build_soundscape_service};
use storyscore::domain::ReadingSpeed;

fn scaffold() -> ScaffoldConfig {
    ScaffoldConfig {
        enabled: true,
        mock_render_delay_ms: 0,
    }
}

#[test]
fn given_defaults_when_validating_then_they_are_accepted() {
    let settings = Settings::default();

    assert!(settings.validate().is_ok());
    assert_eq!(settings.reading_speed().unwrap(), ReadingSpeed::default());
    assert_eq!(settings.llm.provider, LlmProvider::Gemini);
    assert_eq!(
        settings.sources.order,
        vec![SourceKind::Llm, SourceKind::Keyword, SourceKind::Lexical]
    );
}

#[test]
fn given_settings_file_when_loading_then_values_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("appsettings.test.toml"),
        r#"
[reading]
speed_wps = 3.0

[llm]
provider = "none"

[sources]
order = ["keyword"]

[render]
provider = "mock"
mode = "parallel"
workers = 3
timeout_secs = 10
"#,
    )
    .unwrap();

    let settings = Settings::load_from(Environment::Test, dir.path()).unwrap();

    assert_eq!(settings.reading.speed_wps, 3.0);
    assert_eq!(settings.llm.provider, LlmProvider::None);
    assert_eq!(settings.sources.order, vec![SourceKind::Keyword]);
    assert_eq!(settings.render.provider, RenderProvider::Mock);
    assert_eq!(settings.render.sample_rate, 44_100);

    let policy = settings.dispatch_policy();
    assert_eq!(policy.mode, ExecutionMode::Parallel { workers: 3 });
    assert_eq!(policy.render_timeout, Duration::from_secs(10));
}

#[test]
fn given_missing_settings_file_when_loading_then_defaults_apply() {
    let dir = tempfile::tempdir().unwrap();

    let settings = Settings::load_from(Environment::Prod, dir.path()).unwrap();

    assert_eq!(settings.render.workers, 2);
    assert_eq!(settings.timing.sfx_default_ms, 2000);
}

#[test]
fn given_zero_reading_speed_when_loading_then_invalid() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("appsettings.test.toml"),
        "[reading]\nspeed_wps = 0.0\n",
    )
    .unwrap();

    let result = Settings::load_from(Environment::Test, dir.path());

    assert!(matches!(result, Err(SettingsError::Invalid(_))));
}

#[test]
fn given_zero_workers_when_validating_then_invalid() {
    let mut settings = Settings::default();
    settings.render.workers = 0;

    assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));
}

#[test]
fn given_environment_names_when_parsing_then_aliases_are_accepted() {
    assert_eq!(Environment::try_from("Production".to_string()), Ok(Environment::Prod));
    assert_eq!(Environment::try_from("dev".to_string()), Ok(Environment::Local));
    assert_eq!(Environment::try_from("test".to_string()), Ok(Environment::Test));
    assert!(Environment::try_from("staging".to_string()).is_err());
    assert_eq!(Environment::Test.settings_file_stem(), "appsettings.test");
}

#[test]
fn given_custom_window_without_modifiers_when_building_gain_modifiers_then_defaults_keep_the_window() {
    let mut settings = Settings::default();
    settings.gain.window = 4;

    let modifiers = settings.gain_modifiers();

    assert_eq!(modifiers.window(), 4);
    assert_eq!(modifiers.offset_for("loud"), Some(6.0));
}

#[test]
fn given_scaffold_mode_when_building_sources_then_llm_is_skipped() {
    let settings = Settings::default();

    let sources = build_cue_sources(&settings, &scaffold());
    let names: Vec<&str> = sources.iter().map(|s| s.name()).collect();

    assert_eq!(names, vec!["keyword", "lexical"]);
}

#[tokio::test]
async fn given_scaffold_mode_when_generating_then_mock_renderers_produce_a_mix() {
    let mut settings = Settings::default();
    settings.render.sample_rate = 8_000;
    let service = build_soundscape_service(&settings, &scaffold()).unwrap();

    let track = service
        .generate_from_story("It started to rain and a dog barked", ReadingSpeed::default())
        .await
        .unwrap();

    assert_eq!(track.waveform.sample_rate, 8_000);
    assert_eq!(track.waveform.len(), 32_000);
    assert!(track.failures.is_empty());
    assert!(track.waveform.peak() > 0.0);
}
