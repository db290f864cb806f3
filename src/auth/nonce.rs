//! Nonce generation for Kraken API authentication.
//!
//! Kraken requires a strictly increasing nonce for each authenticated request
//! made with the same API key.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing nonces for authenticated requests.
///
/// The nonce must be strictly increasing for each request.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    ///
    /// This value must be greater than any previously returned value.
    fn next_nonce(&self) -> u64;
}

/// A nonce provider based on wall-clock milliseconds.
///
/// Seeded with the current time at construction. Each call returns the
/// current time when it has advanced past the last nonce, and the last nonce
/// plus one otherwise, so bursts within one millisecond stay strictly
/// increasing (and may run ahead of the clock).
pub struct IncreasingNonce {
    last_nonce: AtomicU64,
}

impl IncreasingNonce {
    /// Create a provider seeded with the current time.
    pub fn new() -> Self {
        Self::starting_at(Self::current_time_millis())
    }

    /// Create a provider whose first nonce is greater than `last`.
    pub fn starting_at(last: u64) -> Self {
        Self {
            last_nonce: AtomicU64::new(last),
        }
    }

    /// Get current time in milliseconds since UNIX epoch.
    fn current_time_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

impl Default for IncreasingNonce {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceProvider for IncreasingNonce {
    fn next_nonce(&self) -> u64 {
        let now = Self::current_time_millis();

        loop {
            let last = self.last_nonce.load(Ordering::SeqCst);
            let next = if now > last { now } else { last + 1 };

            if self
                .last_nonce
                .compare_exchange(last, next, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return next;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_nonce_strictly_increasing() {
        let provider = IncreasingNonce::new();

        let mut last = 0u64;
        for _ in 0..10_000 {
            let nonce = provider.next_nonce();
            assert!(nonce > last, "Nonce must be strictly increasing");
            last = nonce;
        }
    }

    #[test]
    fn test_nonce_seeded_from_wall_clock() {
        let before = IncreasingNonce::current_time_millis();
        let nonce = IncreasingNonce::new().next_nonce();
        // Millisecond resolution: far above any 32-bit value.
        assert!(nonce > u64::from(u32::MAX));
        assert!(nonce >= before);
    }

    #[test]
    fn test_nonce_ahead_of_clock_increments() {
        let ahead = IncreasingNonce::current_time_millis() + 60_000;
        let provider = IncreasingNonce::starting_at(ahead);
        assert_eq!(provider.next_nonce(), ahead + 1);
        assert_eq!(provider.next_nonce(), ahead + 2);
    }

    #[test]
    fn test_nonce_unique_across_threads() {
        let provider = std::sync::Arc::new(IncreasingNonce::new());
        let mut handles = vec![];

        for _ in 0..4 {
            let p = provider.clone();
            handles.push(thread::spawn(move || {
                (0..1000).map(|_| p.next_nonce()).collect::<Vec<_>>()
            }));
        }

        let mut all_nonces = HashSet::new();
        for handle in handles {
            for nonce in handle.join().unwrap() {
                assert!(all_nonces.insert(nonce), "Nonce must be unique");
            }
        }
    }
}
