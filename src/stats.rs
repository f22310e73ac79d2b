use ndarray::Array1;

/// Collects every differential observed during a session for end-of-run
/// reporting. Unlike the counter's rolling window this is unbounded, but it
/// lives only for the duration of the run.
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    measurements: Vec<f32>,
}

/// Aggregate statistics over a session's differential signal
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSummary {
    pub samples: usize,
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    pub std_dev: f32,
    /// Full span of the signal, `max - min`
    pub range: f32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one analyzed differential sample
    pub fn record(&mut self, diff: f32) {
        self.measurements.push(diff);
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// Summarizes the recorded signal; `None` when nothing was recorded
    pub fn summary(&self) -> Option<StatsSummary> {
        if self.measurements.is_empty() {
            return None;
        }
        let values = Array1::from_vec(self.measurements.clone());
        let mean = values.mean()?;
        let std_dev = values.std(0.0);
        let min = self.measurements.iter().copied().fold(f32::MAX, f32::min);
        let max = self.measurements.iter().copied().fold(f32::MIN, f32::max);
        Some(StatsSummary {
            samples: self.measurements.len(),
            min,
            max,
            mean,
            std_dev,
            range: max - min,
        })
    }
}
