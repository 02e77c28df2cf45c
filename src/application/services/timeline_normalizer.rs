use crate::domain::{
    Channel, Cue, CueId, PendingCue, RawCandidate, ReadingSpeed, Timeline, parse_candidate,
};

/// Duration defaults and floors applied while resolving cue timing.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingPolicy {
    pub sfx_default_ms: u64,
    pub music_default_ms: u64,
    /// Floor for declared durations and for continuous cues cut short by a successor.
    pub min_duration_ms: u64,
    pub default_fade_ms: u64,
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self {
            sfx_default_ms: 2000,
            music_default_ms: 5000,
            min_duration_ms: 100,
            default_fade_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationReport {
    pub timeline: Timeline,
    /// Candidates that could not be placed on the canvas.
    pub dropped: usize,
}

/// Turns untrusted cue proposals into an ordered, bounds-safe timeline in
/// which no continuous channel overlaps itself.
///
/// Stateless: the same input always yields the same ids, order and timings.
#[derive(Debug, Clone, Default)]
pub struct TimelineNormalizer {
    policy: TimingPolicy,
}

struct Placement {
    pending: PendingCue,
    start_ms: u64,
    duration_ms: u64,
    kept: bool,
}

impl TimelineNormalizer {
    pub fn new(policy: TimingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &TimingPolicy {
        &self.policy
    }

    pub fn normalize(
        &self,
        candidates: &[RawCandidate],
        total_duration_ms: u64,
        speed: ReadingSpeed,
    ) -> NormalizationReport {
        let mut dropped = 0usize;
        let mut placements = Vec::with_capacity(candidates.len());

        for (order, raw) in candidates.iter().enumerate() {
            let pending = parse_candidate(raw, self.policy.default_fade_ms);
            let start_ms = self.resolve_start(&pending, total_duration_ms, speed);

            if start_ms >= total_duration_ms {
                tracing::debug!(
                    order,
                    channel = %pending.channel,
                    start_ms,
                    total_duration_ms,
                    "Dropping cue starting at or beyond the end of the timeline"
                );
                dropped += 1;
                continue;
            }

            let duration_ms = self
                .resolve_duration(&pending, start_ms, total_duration_ms)
                .min(total_duration_ms - start_ms);

            if duration_ms == 0 {
                tracing::debug!(order, channel = %pending.channel, "Dropping zero-length cue");
                dropped += 1;
                continue;
            }

            placements.push(Placement {
                pending,
                start_ms,
                duration_ms,
                kept: true,
            });
        }

        // Stable: equal start times keep candidate order.
        placements.sort_by_key(|p| p.start_ms);

        dropped += self.resolve_overlaps(&mut placements);

        let cues: Vec<Cue> = placements
            .into_iter()
            .filter(|p| p.kept)
            .enumerate()
            .map(|(id, p)| Cue {
                id: CueId::new(id as u32),
                channel: p.pending.channel,
                start_time_ms: p.start_ms,
                duration_ms: p.duration_ms,
                content: p.pending.content,
            })
            .collect();

        tracing::debug!(
            candidates = candidates.len(),
            cues = cues.len(),
            dropped,
            total_duration_ms,
            "Timeline normalized"
        );

        NormalizationReport {
            timeline: Timeline::new(cues, total_duration_ms),
            dropped,
        }
    }

    fn resolve_start(&self, pending: &PendingCue, total_duration_ms: u64, speed: ReadingSpeed) -> u64 {
        match pending.explicit_start_ms {
            Some(start) => (start.max(0.0).round() as u64).min(total_duration_ms),
            None => {
                let word_index = pending.word_index.unwrap_or(0.0).max(0.0).floor() as u64;
                speed.ms_at_word(word_index)
            }
        }
    }

    fn resolve_duration(&self, pending: &PendingCue, start_ms: u64, total_duration_ms: u64) -> u64 {
        if let Some(declared) = pending.explicit_duration_ms {
            return (declared.max(0.0).round() as u64).max(self.policy.min_duration_ms);
        }
        match pending.channel {
            Channel::Sfx => self.policy.sfx_default_ms,
            Channel::Music => self.policy.music_default_ms,
            Channel::Ambience | Channel::Narrator => total_duration_ms - start_ms,
        }
    }

    /// Earlier continuous cues yield to later ones on the same channel: the
    /// running cue is cut exactly where its successor begins. A cut that
    /// would leave less than the minimum duration removes the earlier cue.
    ///
    /// Returns the number of cues removed.
    fn resolve_overlaps(&self, placements: &mut [Placement]) -> usize {
        let mut removed = 0usize;
        let mut running: [Option<usize>; 4] = [None; 4];

        for current in 0..placements.len() {
            let channel = placements[current].pending.channel;
            if !channel.is_continuous() {
                continue;
            }

            if let Some(previous) = running[channel.index()] {
                let next_start = placements[current].start_ms;
                let prev_start = placements[previous].start_ms;
                let prev_end = prev_start + placements[previous].duration_ms;

                if next_start < prev_end {
                    let truncated = next_start - prev_start;
                    if truncated == 0 || truncated < self.policy.min_duration_ms {
                        tracing::debug!(
                            channel = %channel,
                            start_ms = prev_start,
                            next_start_ms = next_start,
                            "Dropping continuous cue displaced by its successor"
                        );
                        placements[previous].kept = false;
                        removed += 1;
                    } else {
                        tracing::trace!(
                            channel = %channel,
                            start_ms = prev_start,
                            from_ms = placements[previous].duration_ms,
                            to_ms = truncated,
                            "Truncating continuous cue at successor start"
                        );
                        placements[previous].duration_ms = truncated;
                    }
                }
            }

            running[channel.index()] = Some(current);
        }

        removed
    }
}
