//! Fixed-capacity performance counters. One named ring buffer per solver
//! phase, each holding the last [`RING_CAPACITY`] timing samples in
//! milliseconds, for a caller to inspect without the solver allocating on
//! every step.

use std::collections::HashMap;

/// Number of samples each [`RingBuffer`] retains.
pub const RING_CAPACITY: usize = 16;

/// A fixed-size circular buffer of millisecond timing samples. Pushing past
/// capacity overwrites the oldest sample.
#[derive(Debug, Clone, Copy)]
pub struct RingBuffer {
    samples: [f64; RING_CAPACITY],
    next: usize,
    len: usize,
}

impl Default for RingBuffer {
    fn default() -> Self {
        RingBuffer {
            samples: [0.0; RING_CAPACITY],
            next: 0,
            len: 0,
        }
    }
}

impl RingBuffer {
    /// An empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sample, in milliseconds.
    pub fn push(&mut self, sample_ms: f64) {
        self.samples[self.next] = sample_ms;
        self.next = (self.next + 1) % RING_CAPACITY;
        self.len = (self.len + 1).min(RING_CAPACITY);
    }

    /// Number of live samples, at most [`RING_CAPACITY`].
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no sample has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate the live samples, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let start = if self.len < RING_CAPACITY { 0 } else { self.next };
        (0..self.len).map(move |i| self.samples[(start + i) % RING_CAPACITY])
    }

    /// Mean of the live samples, or 0.0 if empty.
    pub fn average(&self) -> f64 {
        if self.len == 0 {
            0.0
        } else {
            self.iter().sum::<f64>() / self.len as f64
        }
    }
}

/// Named timing counters for the three phases of [`Solver::step`](crate::Solver::step).
#[derive(Debug, Clone, Default)]
pub struct Performance {
    /// Time spent building candidate pairs via the bounding-circle reject.
    pub broad_phase: RingBuffer,
    /// Time spent dispatching and resolving candidate pairs.
    pub narrow_phase: RingBuffer,
    /// Time spent integrating body positions.
    pub integrate: RingBuffer,
}

impl Performance {
    /// A name-to-buffer view, for callers that want to iterate all counters
    /// generically (a logging sink, a debug overlay) rather than naming each
    /// field.
    pub fn as_map(&self) -> HashMap<&'static str, &RingBuffer> {
        let mut map = HashMap::with_capacity(3);
        map.insert("broad_phase", &self.broad_phase);
        map.insert("narrow_phase", &self.narrow_phase);
        map.insert("integrate", &self.integrate);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_of_empty_buffer_is_zero() {
        assert_eq!(RingBuffer::new().average(), 0.0);
    }

    #[test]
    fn average_matches_simple_mean_before_wraparound() {
        let mut buf = RingBuffer::new();
        buf.push(1.0);
        buf.push(2.0);
        buf.push(3.0);
        assert_eq!(buf.average(), 2.0);
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn push_past_capacity_overwrites_oldest() {
        let mut buf = RingBuffer::new();
        for i in 0..(RING_CAPACITY + 3) {
            buf.push(i as f64);
        }
        assert_eq!(buf.len(), RING_CAPACITY);
        let samples: Vec<f64> = buf.iter().collect();
        assert_eq!(samples.first().copied(), Some(3.0));
        assert_eq!(samples.last().copied(), Some((RING_CAPACITY + 2) as f64));
    }

    #[test]
    fn as_map_exposes_all_three_named_counters() {
        let perf = Performance::default();
        let map = perf.as_map();
        assert!(map.contains_key("broad_phase"));
        assert!(map.contains_key("narrow_phase"));
        assert!(map.contains_key("integrate"));
    }
}
