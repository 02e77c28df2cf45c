mod helpers;

use storyscore::application::services::{TimelineNormalizer, TimingPolicy};
use storyscore::domain::{Channel, CueContent, RawCandidate};

use helpers::speed;

fn ambience(start: f64, duration: f64) -> RawCandidate {
    RawCandidate {
        channel: Some("AMBIENCE".to_string()),
        description: Some("rain".to_string()),
        start_time_ms: Some(start),
        duration_ms: Some(duration),
        ..RawCandidate::default()
    }
}

fn normalizer() -> TimelineNormalizer {
    TimelineNormalizer::new(TimingPolicy::default())
}

#[test]
fn given_overlapping_ambience_when_normalizing_then_earlier_is_cut_and_later_clamped() {
    let candidates = vec![ambience(0.0, 8000.0), ambience(3000.0, 8000.0)];

    let report = normalizer().normalize(&candidates, 10_000, speed(2.0));
    let cues = &report.timeline.cues;

    assert_eq!(cues.len(), 2);
    assert!(cues.iter().all(|c| c.channel == Channel::Ambience));
    assert_eq!((cues[0].start_time_ms, cues[0].duration_ms), (0, 3000));
    assert_eq!((cues[1].start_time_ms, cues[1].duration_ms), (3000, 7000));
    assert_eq!(report.dropped, 0);
}

#[test]
fn given_candidate_starting_past_the_end_when_normalizing_then_exactly_it_is_dropped() {
    let candidates = vec![
        RawCandidate::audio(Channel::Sfx, "bark", 1),
        RawCandidate::audio(Channel::Sfx, "thud", 0).with_start_ms(12_000.0),
        RawCandidate::audio(Channel::Music, "strings", 2),
    ];

    let report = normalizer().normalize(&candidates, 10_000, speed(2.0));

    assert_eq!(report.timeline.len(), candidates.len() - 1);
    assert_eq!(report.dropped, 1);
    assert!(report.timeline.cues.iter().all(|c| c.label() != "thud"));
}

#[test]
fn given_no_candidates_when_normalizing_then_empty_timeline_keeps_total() {
    let report = normalizer().normalize(&[], 7_500, speed(2.0));

    assert!(report.timeline.is_empty());
    assert_eq!(report.timeline.total_duration_ms, 7_500);
    assert_eq!(report.dropped, 0);
}

#[test]
fn given_sfx_without_duration_when_normalizing_then_default_duration_applies() {
    let candidates = vec![RawCandidate::audio(Channel::Sfx, "door slam", 4)];

    let report = normalizer().normalize(&candidates, 10_000, speed(2.0));
    let cue = &report.timeline.cues[0];

    assert_eq!(cue.start_time_ms, 2000);
    assert_eq!(cue.duration_ms, 2000);
}

#[test]
fn given_sfx_without_duration_near_the_end_when_normalizing_then_duration_is_clamped() {
    let candidates = vec![RawCandidate::audio(Channel::Sfx, "door slam", 19)];

    let report = normalizer().normalize(&candidates, 10_000, speed(2.0));
    let cue = &report.timeline.cues[0];

    assert_eq!(cue.start_time_ms, 9500);
    assert_eq!(cue.duration_ms, 500);
    assert_eq!(cue.end_time_ms(), 10_000);
}

#[test]
fn given_ambience_without_duration_when_normalizing_then_it_runs_to_the_end() {
    let candidates = vec![RawCandidate::audio(Channel::Ambience, "forest", 6)];

    let report = normalizer().normalize(&candidates, 10_000, speed(2.0));

    assert_eq!(report.timeline.cues[0].start_time_ms, 3000);
    assert_eq!(report.timeline.cues[0].duration_ms, 7000);
}

#[test]
fn given_music_without_duration_when_normalizing_then_music_default_applies() {
    let candidates = vec![RawCandidate::audio(Channel::Music, "strings", 0)];

    let report = normalizer().normalize(&candidates, 20_000, speed(2.0));

    assert_eq!(report.timeline.cues[0].duration_ms, 5000);
}

#[test]
fn given_long_narration_when_normalizing_then_it_is_clamped_not_extended() {
    let candidates = vec![
        RawCandidate::narration("The whole story read aloud", "calm").with_duration_ms(60_000.0),
    ];

    let report = normalizer().normalize(&candidates, 10_000, speed(2.0));
    let cue = &report.timeline.cues[0];

    assert_eq!(report.timeline.total_duration_ms, 10_000);
    assert_eq!(cue.channel, Channel::Narrator);
    assert_eq!(cue.end_time_ms(), 10_000);
    assert!(matches!(cue.content, CueContent::Narration(_)));
}

#[test]
fn given_unordered_candidates_when_normalizing_then_output_is_sorted_with_sequential_ids() {
    let candidates = vec![
        RawCandidate::audio(Channel::Sfx, "late", 10),
        RawCandidate::audio(Channel::Sfx, "early", 1),
        RawCandidate::audio(Channel::Music, "middle", 5),
    ];

    let report = normalizer().normalize(&candidates, 10_000, speed(2.0));
    let labels: Vec<&str> = report.timeline.cues.iter().map(|c| c.label()).collect();
    let ids: Vec<u32> = report.timeline.cues.iter().map(|c| c.id.as_u32()).collect();

    assert_eq!(labels, vec!["early", "middle", "late"]);
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn given_equal_start_times_when_normalizing_then_candidate_order_is_kept() {
    let candidates = vec![
        RawCandidate::audio(Channel::Sfx, "first", 2),
        RawCandidate::audio(Channel::Sfx, "second", 2),
    ];

    let report = normalizer().normalize(&candidates, 10_000, speed(2.0));

    assert_eq!(report.timeline.cues[0].label(), "first");
    assert_eq!(report.timeline.cues[1].label(), "second");
}

#[test]
fn given_same_input_twice_when_normalizing_then_results_are_identical() {
    let candidates = vec![
        ambience(0.0, 9000.0),
        RawCandidate::audio(Channel::Sfx, "bark", 3).with_gain_db(6.0),
        ambience(4000.0, 3000.0),
        RawCandidate::audio(Channel::Music, "score", 8),
        RawCandidate::narration("Once upon a time", "warm"),
    ];
    let normalizer = normalizer();

    let first = normalizer.normalize(&candidates, 12_000, speed(2.0));
    let second = normalizer.normalize(&candidates, 12_000, speed(2.0));

    assert_eq!(first, second);
}

#[test]
fn given_mixed_input_when_normalizing_then_timeline_is_well_formed() {
    let candidates = vec![
        ambience(-500.0, 20_000.0),
        ambience(2000.0, 1000.0),
        ambience(2500.0, 50_000.0),
        RawCandidate::audio(Channel::Music, "a", 0).with_duration_ms(9000.0),
        RawCandidate::audio(Channel::Music, "b", 4),
        RawCandidate::audio(Channel::Sfx, "c", 2),
        RawCandidate::audio(Channel::Sfx, "d", 2),
        RawCandidate::narration("part one", "calm").with_start_ms(0.0),
        RawCandidate::narration("part two", "calm").with_start_ms(4000.0),
    ];

    let report = normalizer().normalize(&candidates, 8_000, speed(2.0));

    assert!(report.timeline.is_well_formed());
    for cue in &report.timeline.cues {
        assert!(cue.duration_ms > 0);
        assert!(cue.end_time_ms() <= 8_000);
    }
}

#[test]
fn given_sfx_cues_at_the_same_time_when_normalizing_then_both_survive() {
    let candidates = vec![
        RawCandidate::audio(Channel::Sfx, "bark", 2),
        RawCandidate::audio(Channel::Sfx, "thunder clap", 2),
    ];

    let report = normalizer().normalize(&candidates, 10_000, speed(2.0));

    assert_eq!(report.timeline.len(), 2);
    assert_eq!(report.timeline.cues[0].duration_ms, 2000);
    assert_eq!(report.timeline.cues[1].duration_ms, 2000);
}

#[test]
fn given_successor_that_leaves_a_sliver_when_normalizing_then_earlier_cue_is_dropped() {
    let candidates = vec![ambience(1000.0, 5000.0), ambience(1050.0, 2000.0)];

    let report = normalizer().normalize(&candidates, 10_000, speed(2.0));

    assert_eq!(report.timeline.len(), 1);
    assert_eq!(report.timeline.cues[0].start_time_ms, 1050);
    assert_eq!(report.dropped, 1);
}

#[test]
fn given_negative_word_index_when_normalizing_then_cue_starts_at_zero() {
    let candidates = vec![RawCandidate {
        channel: Some("sfx".to_string()),
        description: Some("creak".to_string()),
        word_index: Some(-3.0),
        ..RawCandidate::default()
    }];

    let report = normalizer().normalize(&candidates, 5_000, speed(2.0));

    assert_eq!(report.timeline.cues[0].start_time_ms, 0);
}

#[test]
fn given_unknown_channel_tag_when_normalizing_then_cue_is_kept_as_sfx() {
    let candidates = vec![RawCandidate {
        channel: Some("FOLEY".to_string()),
        description: Some("cloth rustle".to_string()),
        word_index: Some(1.0),
        ..RawCandidate::default()
    }];

    let report = normalizer().normalize(&candidates, 5_000, speed(2.0));

    assert_eq!(report.timeline.len(), 1);
    assert_eq!(report.timeline.cues[0].channel, Channel::Sfx);
}

#[test]
fn given_fractional_speed_when_normalizing_then_word_start_rounds_up() {
    let candidates = vec![RawCandidate::audio(Channel::Sfx, "knock", 1)];

    let report = normalizer().normalize(&candidates, 10_000, speed(3.0));

    assert_eq!(report.timeline.cues[0].start_time_ms, 334);
}
