use crate::counter::Direction;

/// A fixed-capacity rolling window of per-frame differential samples.
///
/// Backed by a ring (array + head index): pushing past capacity overwrites
/// the oldest sample, so the hot per-frame path never reallocates.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleWindow {
    samples: Vec<f32>,
    head: usize,
    capacity: usize,
}

impl SampleWindow {
    /// Create a new empty window holding at most `capacity` samples
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            head: 0,
            capacity,
        }
    }

    /// Add a new sample, evicting the oldest once the window is full
    pub fn push(&mut self, value: f32) {
        if self.samples.len() < self.capacity {
            self.samples.push(value);
        } else {
            self.samples[self.head] = value;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    /// Net change between the newest sample and the sample `span - 1`
    /// frames before it. `None` until `span` samples have been observed.
    pub fn net_change(&self, span: usize) -> Option<f32> {
        if span < 2 || self.samples.len() < span {
            return None;
        }
        let newest = self.samples[self.index_back(0)?];
        let oldest = self.samples[self.index_back(span - 1)?];
        Some(newest - oldest)
    }

    /// Get the most recent sample without removing it
    pub fn latest(&self) -> Option<f32> {
        Some(self.samples[self.index_back(0)?])
    }

    /// Get the number of samples in the window
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the window is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop every sample, keeping the allocated capacity
    pub fn clear(&mut self) {
        self.samples.clear();
        self.head = 0;
    }

    // Index of the sample `k` frames before the newest one. `head` points at
    // the oldest sample once the ring has wrapped.
    fn index_back(&self, k: usize) -> Option<usize> {
        if k >= self.samples.len() {
            return None;
        }
        if self.samples.len() < self.capacity {
            Some(self.samples.len() - 1 - k)
        } else {
            Some((self.head + self.capacity - 1 - k) % self.capacity)
        }
    }
}

/// A single confirmed transition of the motion direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionChange {
    pub direction: Direction,
    /// Session-relative time of the transition, in seconds
    pub time: f64,
    /// Differential value at the transition instant
    pub diff: f32,
}

/// A bounded log of confirmed direction transitions.
///
/// Transitions arrive only a few times per repetition, so a front-evicting
/// `Vec` keeps this simpler than a second ring; the detector only ever
/// inspects the last two entries.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionLog {
    changes: Vec<DirectionChange>,
    capacity: usize,
}

impl DirectionLog {
    /// Create a new empty log holding at most `capacity` transitions
    pub fn new(capacity: usize) -> Self {
        Self {
            changes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a transition, evicting the oldest once the log is full
    pub fn push(&mut self, change: DirectionChange) {
        if self.changes.len() == self.capacity {
            self.changes.remove(0);
        }
        self.changes.push(change);
    }

    /// The last two transitions in arrival order, if at least two exist
    pub fn last_two(&self) -> Option<(DirectionChange, DirectionChange)> {
        if self.changes.len() < 2 {
            return None;
        }
        Some((
            self.changes[self.changes.len() - 2],
            self.changes[self.changes.len() - 1],
        ))
    }

    /// Get the number of transitions in the log
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Drop every recorded transition
    pub fn clear(&mut self) {
        self.changes.clear();
    }
}
