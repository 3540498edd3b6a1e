//! Injectable randomness for damage rolls, level rolls and fallback picks.

/// Source of uniformly distributed integers.
///
/// The battle engine and the fallback generator take one of these at
/// construction so tests can script every roll.
pub trait RandomSource {
    /// Returns an integer in `low..=high`. `reason` names the roll for debugging.
    fn range_inclusive(&mut self, low: u32, high: u32, reason: &str) -> u32;

    /// Uniform index into a non-empty collection of `len` items.
    fn pick_index(&mut self, len: usize, reason: &str) -> usize {
        let high = u32::try_from(len.saturating_sub(1)).unwrap_or(u32::MAX);
        self.range_inclusive(0, high, reason) as usize
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn range_inclusive(&mut self, low: u32, high: u32, reason: &str) -> u32 {
        (**self).range_inclusive(low, high, reason)
    }
}

/// Production source backed by the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn range_inclusive(&mut self, low: u32, high: u32, _reason: &str) -> u32 {
        use rand::Rng;
        let (low, high) = (low.min(high), low.max(high));
        rand::rng().random_range(low..=high)
    }
}

/// Pre-determined outcomes, consumed in order.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    outcomes: Vec<u32>,
    index: usize,
}

impl ScriptedRandom {
    pub fn new_for_test(outcomes: Vec<u32>) -> Self {
        Self { outcomes, index: 0 }
    }

    /// Number of outcomes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.outcomes.len() - self.index
    }
}

impl RandomSource for ScriptedRandom {
    fn range_inclusive(&mut self, low: u32, high: u32, reason: &str) -> u32 {
        if self.index >= self.outcomes.len() {
            panic!(
                "ScriptedRandom exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = self.outcomes[self.index];
        if outcome < low.min(high) || outcome > low.max(high) {
            panic!(
                "ScriptedRandom outcome {} for '{}' is outside {}..={}",
                outcome, reason, low, high
            );
        }

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        self.index += 1;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_random_stays_in_range() {
        let mut rng = ThreadRandom;
        for _ in 0..500 {
            let roll = rng.range_inclusive(15, 24, "damage");
            assert!((15..=24).contains(&roll));
        }
        assert_eq!(rng.range_inclusive(7, 7, "fixed"), 7);
    }

    #[test]
    fn test_scripted_random_replays_in_order() {
        let mut rng = ScriptedRandom::new_for_test(vec![20, 15, 2]);
        assert_eq!(rng.range_inclusive(15, 24, "player attack"), 20);
        assert_eq!(rng.range_inclusive(10, 19, "opponent attack"), 15);
        assert_eq!(rng.pick_index(3, "catalog"), 2);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn test_scripted_random_panics_when_exhausted() {
        let mut rng = ScriptedRandom::new_for_test(vec![]);
        rng.range_inclusive(0, 1, "empty");
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_scripted_random_rejects_out_of_range_outcome() {
        let mut rng = ScriptedRandom::new_for_test(vec![30]);
        rng.range_inclusive(15, 24, "player attack");
    }
}
