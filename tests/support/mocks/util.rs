// tests/support/mocks/util.rs
use chrono::{DateTime, Duration, Utc};
use mokkan_sites::application::ports::{time::Clock, util::SlugGenerator};
use std::sync::Mutex;

/// Deterministic clock. Every reading moves time forward by one millisecond
/// so that audit entries keep a strict order; `advance` jumps further.
pub struct TestClock {
    now: Mutex<DateTime<Utc>>,
}

impl TestClock {
    pub fn new() -> Self {
        Self::starting_at(super::time::fixed_now())
    }

    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }

    pub fn peek(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        let mut now = self.now.lock().unwrap();
        let current = *now;
        *now = current + Duration::milliseconds(1);
        current
    }
}

/// Lowercases and joins words with hyphens; enough for ASCII test titles.
#[derive(Clone)]
pub struct DummySlug;

impl SlugGenerator for DummySlug {
    fn slugify(&self, s: &str) -> String {
        s.split_whitespace()
            .map(str::to_ascii_lowercase)
            .collect::<Vec<_>>()
            .join("-")
    }
}
