//! Fixed-window moving average.

/// Moving average over the last `N` samples.
///
/// Until the window fills, the average is taken over the samples seen so
/// far, so the filter converges from the first sample instead of dragging
/// in zeros. An empty filter averages to 0, which the tracker uses as the
/// "no previous frame to diff against" sentinel (device coordinates are
/// never 0 for a real contact).
///
/// # RT Safety
///
/// - No heap allocations
/// - O(1) time per sample
/// - `Copy`, so slot hand-off is a plain assignment
#[derive(Debug, Clone, Copy)]
pub struct SimpleAverage<const N: usize> {
    buffer: [i32; N],
    count: usize,
    sum: i32,
    index: usize,
}

impl<const N: usize> SimpleAverage<N> {
    /// An empty filter.
    pub const fn new() -> Self {
        Self {
            buffer: [0; N],
            count: 0,
            sum: 0,
            index: 0,
        }
    }

    /// Push a sample and return the updated average.
    pub fn filter(&mut self, sample: i32) -> i32 {
        self.sum += sample;
        if self.count == N {
            // Full window: the slot we are about to overwrite leaves the sum.
            self.sum -= self.buffer[self.index];
        }
        self.buffer[self.index] = sample;
        self.index += 1;
        if self.index >= N {
            self.index = 0;
        }
        if self.count < N {
            self.count += 1;
        }
        self.sum / self.count as i32
    }

    /// Average of the buffered samples; 0 when empty.
    pub fn average(&self) -> i32 {
        if self.count == 0 {
            return 0;
        }
        self.sum / self.count as i32
    }

    /// Number of samples currently buffered.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether any sample has been buffered since the last reset.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Clear all history.
    pub fn reset(&mut self) {
        self.count = 0;
        self.sum = 0;
        self.index = 0;
    }
}

impl<const N: usize> Default for SimpleAverage<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_input_converges_exactly() {
        let mut avg = SimpleAverage::<5>::new();
        for _ in 0..5 {
            avg.filter(1234);
        }
        assert_eq!(avg.average(), 1234);
        // Stays exact once the window is saturated.
        for _ in 0..10 {
            assert_eq!(avg.filter(1234), 1234);
        }
    }

    #[test]
    fn partial_window_uses_partial_count() {
        let mut avg = SimpleAverage::<5>::new();
        assert_eq!(avg.filter(10), 10);
        assert_eq!(avg.filter(20), 15);
        assert_eq!(avg.filter(30), 20);
    }

    #[test]
    fn full_window_drops_oldest() {
        let mut avg = SimpleAverage::<3>::new();
        avg.filter(3);
        avg.filter(6);
        avg.filter(9);
        // 3 leaves the window: (6 + 9 + 12) / 3.
        assert_eq!(avg.filter(12), 9);
    }

    #[test]
    fn reset_restores_the_zero_sentinel() {
        let mut avg = SimpleAverage::<5>::new();
        avg.filter(999);
        assert!(!avg.is_empty());
        avg.reset();
        assert!(avg.is_empty());
        assert_eq!(avg.average(), 0);
    }

    #[test]
    fn integer_division_truncates_toward_zero() {
        let mut avg = SimpleAverage::<5>::new();
        avg.filter(10);
        avg.filter(11);
        assert_eq!(avg.average(), 10);
    }
}
