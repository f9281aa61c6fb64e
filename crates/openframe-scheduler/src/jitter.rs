//! Frame jitter metrics.

/// Wake-up jitter and missed-frame statistics.
///
/// Jitter is how late a frame started relative to its scheduled deadline.
/// Percentiles are computed over a bounded ring buffer of recent samples.
///
/// `record_frame` is O(1) and allocation-free once the buffer is full.
#[derive(Debug, Clone)]
pub struct JitterMetrics {
    /// Frames recorded.
    pub total_frames: u64,

    /// Frames that started after a whole period was lost.
    pub missed_frames: u64,

    /// Periods skipped in total. One miss can skip several.
    pub skipped_periods: u64,

    pub max_jitter_ns: u64,

    pub last_jitter_ns: u64,

    recent_samples: Vec<u64>,
    max_samples: usize,
    next_sample_index: usize,
    percentile_scratch: Vec<u64>,
}

impl Default for JitterMetrics {
    fn default() -> Self {
        // One minute of frames at 60 Hz.
        Self::with_capacity(3_600)
    }
}

impl JitterMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metrics keeping at most `max_samples` recent jitter samples.
    pub fn with_capacity(max_samples: usize) -> Self {
        Self {
            total_frames: 0,
            missed_frames: 0,
            skipped_periods: 0,
            max_jitter_ns: 0,
            last_jitter_ns: 0,
            recent_samples: Vec::with_capacity(max_samples),
            max_samples,
            next_sample_index: 0,
            percentile_scratch: Vec::with_capacity(max_samples),
        }
    }

    pub fn record_frame(&mut self, jitter_ns: u64, skipped: u64) {
        self.total_frames = self.total_frames.saturating_add(1);
        if skipped > 0 {
            self.missed_frames = self.missed_frames.saturating_add(1);
            self.skipped_periods = self.skipped_periods.saturating_add(skipped);
        }
        self.max_jitter_ns = self.max_jitter_ns.max(jitter_ns);
        self.last_jitter_ns = jitter_ns;

        if self.max_samples == 0 {
            return;
        }

        if self.recent_samples.len() < self.max_samples {
            self.recent_samples.push(jitter_ns);
        } else if let Some(slot) = self.recent_samples.get_mut(self.next_sample_index) {
            *slot = jitter_ns;
            self.next_sample_index = self.next_sample_index.saturating_add(1) % self.max_samples;
        }
    }

    pub fn p99_jitter_ns(&mut self) -> u64 {
        self.percentile_jitter_ns(99)
    }

    pub fn p50_jitter_ns(&mut self) -> u64 {
        self.percentile_jitter_ns(50)
    }

    /// Jitter at `percentile` (0..=100) of the recent window, 0 when empty.
    ///
    /// Uses quickselect over a reused scratch buffer.
    pub fn percentile_jitter_ns(&mut self, percentile: u8) -> u64 {
        if self.recent_samples.is_empty() {
            return 0;
        }

        self.percentile_scratch.clear();
        self.percentile_scratch
            .extend_from_slice(&self.recent_samples);

        let len = self.percentile_scratch.len();
        let index = (len.saturating_mul(usize::from(percentile.min(100))) / 100)
            .min(len.saturating_sub(1));
        let (_, value, _) = self.percentile_scratch.select_nth_unstable(index);
        *value
    }

    /// Fraction of frames that missed a whole period (0.0 to 1.0).
    pub fn missed_frame_rate(&self) -> f64 {
        if self.total_frames == 0 {
            0.0
        } else {
            self.missed_frames as f64 / self.total_frames as f64
        }
    }

    pub fn sample_count(&self) -> usize {
        self.recent_samples.len()
    }

    pub fn reset(&mut self) {
        self.total_frames = 0;
        self.missed_frames = 0;
        self.skipped_periods = 0;
        self.max_jitter_ns = 0;
        self.last_jitter_ns = 0;
        self.recent_samples.clear();
        self.next_sample_index = 0;
        self.percentile_scratch.clear();
    }
}
