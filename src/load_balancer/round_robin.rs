//! Grouped round-robin selection.
//!
//! Sends `threshold` consecutive requests to blue, then `threshold` to green,
//! and repeats with period `2 * threshold`.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::load_balancer::backend::BackendId;

/// Traffic splitter shared by all request handlers.
#[derive(Debug)]
pub struct Selector {
    /// Position in the current cycle, always `< 2 * threshold`.
    request_count: AtomicUsize,
    threshold: usize,
}

impl Selector {
    /// Create a selector. A zero threshold is clamped to 1.
    pub fn new(threshold: usize) -> Self {
        Self {
            request_count: AtomicUsize::new(0),
            threshold: threshold.max(1),
        }
    }

    /// Pick the backend for the next request and advance the cycle.
    pub fn next(&self) -> BackendId {
        let period = self.threshold * 2;
        // fetch_update retries until the read-modify-write lands atomically.
        // The closure always returns Some, so Err is unreachable.
        let slot = self
            .request_count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| Some((n + 1) % period))
            .unwrap_or_else(|prev| prev);

        if slot < self.threshold {
            BackendId::Blue
        } else {
            BackendId::Green
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Current position in the cycle.
    pub fn position(&self) -> usize {
        self.request_count.load(Ordering::Acquire)
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    use BackendId::{Blue, Green};

    #[test]
    fn test_grouped_pattern() {
        let selector = Selector::new(3);
        let picks: Vec<_> = (0..12).map(|_| selector.next()).collect();
        assert_eq!(
            picks,
            vec![Blue, Blue, Blue, Green, Green, Green, Blue, Blue, Blue, Green, Green, Green]
        );
    }

    #[test]
    fn test_pattern_repeats_for_other_thresholds() {
        for threshold in 1..=5 {
            let selector = Selector::new(threshold);
            for i in 0..(threshold * 2 * 4) {
                let expected = if i % (threshold * 2) < threshold { Blue } else { Green };
                assert_eq!(selector.next(), expected, "threshold {threshold}, call {i}");
            }
        }
    }

    #[test]
    fn test_threshold_one_alternates() {
        let selector = Selector::new(1);
        assert_eq!(selector.next(), Blue);
        assert_eq!(selector.next(), Green);
        assert_eq!(selector.next(), Blue);
    }

    #[test]
    fn test_counter_stays_below_period() {
        let selector = Selector::new(3);
        for _ in 0..100 {
            selector.next();
            assert!(selector.position() < 6);
        }
        // 100 calls leave the counter at 100 mod 6.
        assert_eq!(selector.position(), 4);
    }

    #[test]
    fn test_zero_threshold_is_clamped() {
        let selector = Selector::new(0);
        assert_eq!(selector.threshold(), 1);
        assert_eq!(selector.next(), Blue);
        assert_eq!(selector.next(), Green);
    }

    #[test]
    fn test_concurrent_calls_keep_exact_split() {
        let selector = Arc::new(Selector::new(3));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let selector = selector.clone();
                thread::spawn(move || {
                    let mut blue = 0usize;
                    for _ in 0..600 {
                        if selector.next() == Blue {
                            blue += 1;
                        }
                    }
                    blue
                })
            })
            .collect();

        let blue: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        // 4800 calls is exactly 800 full cycles.
        assert_eq!(blue, 2400);
        assert_eq!(selector.position(), 0);
    }
}
