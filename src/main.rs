use anyhow::Context;

use storyscore::domain::ReadingSpeed;
use storyscore::infrastructure::audio::write_wav;
use storyscore::infrastructure::observability::{TracingConfig, init_tracing};
use storyscore::presentation::{ScaffoldConfig, Settings, build_soundscape_service};

const USAGE: &str = "usage: storyscore <story.txt> <out.wav> [speed_wps]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (story_path, output_path) = match (args.first(), args.get(1)) {
        (Some(story), Some(output)) => (story.clone(), output.clone()),
        _ => anyhow::bail!(USAGE),
    };

    let (settings, environment) = Settings::load().context("Failed to load settings")?;
    init_tracing(TracingConfig::from_settings(&settings.logging, environment));

    let speed = match args.get(2) {
        Some(raw) => {
            let wps: f64 = raw
                .parse()
                .with_context(|| format!("speed_wps must be a number, got {raw:?}"))?;
            ReadingSpeed::new(wps)?
        }
        None => settings.reading_speed()?,
    };

    let story = tokio::fs::read_to_string(&story_path)
        .await
        .with_context(|| format!("Failed to read story from {story_path}"))?;

    let scaffold = ScaffoldConfig::from_env();
    let service = build_soundscape_service(&settings, &scaffold)?;

    let track = service.generate_from_story(&story, speed).await?;
    write_wav(&output_path, &track.waveform)
        .with_context(|| format!("Failed to write {output_path}"))?;

    println!("{}", serde_json::to_string_pretty(&track.timeline)?);

    tracing::info!(
        output = %output_path,
        cues = track.timeline.len(),
        rendered = track.rendered_count,
        skipped = track.skipped.len(),
        failed = track.failures.len(),
        duration_ms = track.waveform.duration_ms(),
        "Soundscape written"
    );
    Ok(())
}
