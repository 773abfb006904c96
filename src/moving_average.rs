// Bounded moving average used to smooth power-rail readings.

use crate::error::{Result, StatsError};

/// Ring buffer of the most recent samples plus their running sum.
///
/// `observe` returns the mean of the samples seen so far, or of the last
/// `capacity` samples once the ring has filled. Division truncates toward
/// zero, so averages of millivolt/milliamp readings stay integral.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    buffer: Vec<i64>,
    capacity: usize,
    sum: i64,
    pos: usize,
    len: usize,
}

impl MovingAverage {
    /// A capacity of 0 is treated as 1. The window is reserved up front;
    /// a capacity the allocator cannot satisfy is an error.
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = capacity.max(1);
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(capacity)
            .map_err(|source| StatsError::Allocation { capacity, source })?;
        Ok(Self {
            buffer,
            capacity,
            sum: 0,
            pos: 0,
            len: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of samples currently contributing to the average.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn sum(&self) -> i64 {
        self.sum
    }

    /// Records `sample` and returns the current average.
    pub fn observe(&mut self, sample: i64) -> i64 {
        if self.len == self.capacity {
            self.sum -= std::mem::replace(&mut self.buffer[self.pos], sample);
        } else {
            self.buffer.push(sample);
            self.len += 1;
        }
        self.sum += sample;
        self.pos = (self.pos + 1) % self.capacity;
        self.sum / self.len as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_until_full_then_slides() {
        let mut avg = MovingAverage::new(3).unwrap();
        let seen: Vec<i64> = [10, 20, 30, 40].iter().map(|&s| avg.observe(s)).collect();
        assert_eq!(seen, vec![10, 15, 20, 30]);
        assert_eq!(avg.len(), 3);
        assert_eq!(avg.sum(), 90);
    }

    #[test]
    fn sum_tracks_valid_entries_across_many_wraps() {
        let mut avg = MovingAverage::new(4).unwrap();
        let samples: Vec<i64> = (1..=23).map(|i| i * 7 % 11).collect();
        for (n, &s) in samples.iter().enumerate() {
            let got = avg.observe(s);
            let window = &samples[(n + 1).saturating_sub(4)..=n];
            let expected_sum: i64 = window.iter().sum();
            assert_eq!(avg.sum(), expected_sum);
            assert_eq!(got, expected_sum / window.len() as i64);
        }
    }

    #[test]
    fn integer_division_truncates() {
        let mut avg = MovingAverage::new(2).unwrap();
        avg.observe(1);
        assert_eq!(avg.observe(2), 1);
        assert_eq!(avg.observe(-5), -1);
    }

    #[test]
    fn zero_capacity_behaves_like_one() {
        let mut avg = MovingAverage::new(0).unwrap();
        assert_eq!(avg.capacity(), 1);
        assert!(avg.is_empty());
        assert_eq!(avg.observe(42), 42);
        assert_eq!(avg.observe(8), 8);
    }

    #[test]
    fn unsatisfiable_capacity_is_an_error() {
        match MovingAverage::new(usize::MAX / 4) {
            Err(StatsError::Allocation { capacity, .. }) => assert_eq!(capacity, usize::MAX / 4),
            other => panic!("unexpected {other:?}"),
        }
    }
}
