use schema::{CreatureRecord, Rarity};
use std::time::Duration;
use tracing::debug;

pub const RARE_TAMING_SECS: u32 = 10;
pub const COMMON_TAMING_SECS: u32 = 3;
pub const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TamingProgress {
    /// Seconds still to go
    Counting(u32),
    Complete,
}

/// Countdown a freshly identified creature must sit through before it joins the collection.
///
/// Rare and Legendary creatures take longer to tame. The countdown ticks once
/// per second and can be skipped with [`TamingSession::accelerate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TamingSession {
    rarity: Rarity,
    total: u32,
    remaining: u32,
}

impl TamingSession {
    pub fn for_rarity(rarity: Rarity) -> Self {
        let total = if rarity.is_rare() {
            RARE_TAMING_SECS
        } else {
            COMMON_TAMING_SECS
        };
        Self {
            rarity,
            total,
            remaining: total,
        }
    }

    pub fn for_record(record: &CreatureRecord) -> Self {
        Self::for_rarity(record.rarity)
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn progress(&self) -> TamingProgress {
        match self.remaining {
            0 => TamingProgress::Complete,
            left => TamingProgress::Counting(left),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// One second passes.
    pub fn tick(&mut self) -> TamingProgress {
        self.remaining = self.remaining.saturating_sub(1);
        self.progress()
    }

    /// Skips the rest of the countdown.
    pub fn accelerate(&mut self) {
        debug!(skipped = self.remaining, "taming accelerated");
        self.remaining = 0;
    }

    /// Waits out the countdown in real time, calling `on_tick` after every second.
    pub async fn run<F>(&mut self, mut on_tick: F)
    where
        F: FnMut(TamingProgress),
    {
        while !self.is_complete() {
            tokio::time::sleep(TICK).await;
            on_tick(self.tick());
        }
    }
}
