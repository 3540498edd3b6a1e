use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static RECORD_IDS: IdGenerator = IdGenerator::new();

/// Next record id from the process-wide generator.
pub fn next_record_id() -> String {
    RECORD_IDS.next_id()
}

/// Millisecond-timestamp ids, strictly increasing within a process.
///
/// When two ids are requested within the same millisecond (or the clock goes
/// backwards) the previous value plus one is handed out instead.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicU64,
}

impl IdGenerator {
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    pub fn next_id(&self) -> String {
        self.next_with_clock(now_millis()).to_string()
    }

    fn next_with_clock(&self, now: u64) -> u64 {
        let mut previous = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(previous + 1);
            match self.last.compare_exchange_weak(
                previous,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => previous = actual,
            }
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
