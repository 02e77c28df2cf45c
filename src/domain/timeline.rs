use serde::Serialize;

use super::channel::Channel;
use super::cue::Cue;

/// Ordered cues for one story plus the length of the canvas they live on.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Timeline {
    pub cues: Vec<Cue>,
    pub total_duration_ms: u64,
}

impl Timeline {
    pub fn new(cues: Vec<Cue>, total_duration_ms: u64) -> Self {
        Self {
            cues,
            total_duration_ms,
        }
    }

    pub fn empty(total_duration_ms: u64) -> Self {
        Self::new(Vec::new(), total_duration_ms)
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn on_channel(&self, channel: Channel) -> impl Iterator<Item = &Cue> {
        self.cues.iter().filter(move |cue| cue.channel == channel)
    }

    /// True when no continuous channel overlaps itself and every cue fits the canvas.
    pub fn is_well_formed(&self) -> bool {
        let in_bounds = self
            .cues
            .iter()
            .all(|cue| cue.duration_ms > 0 && cue.end_time_ms() <= self.total_duration_ms);

        let no_overlap = Channel::ALL
            .iter()
            .filter(|channel| channel.is_continuous())
            .all(|channel| {
                let mut cues: Vec<&Cue> = self.on_channel(*channel).collect();
                cues.sort_by_key(|cue| cue.start_time_ms);
                cues.windows(2)
                    .all(|pair| pair[0].end_time_ms() <= pair[1].start_time_ms)
            });

        in_bounds && no_overlap
    }
}
