use chrono::Utc;

/// Millisecond clock used for note ids, `time` stamps and the coalescing
/// window. Injected so the debounce policy is deterministic under test.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub mod manual {
    use super::Clock;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Hand-driven clock for tests. Clones share the same instant, so a test
    /// can keep one handle while the store owns the other.
    #[derive(Debug, Clone, Default)]
    pub struct ManualClock(Rc<Cell<i64>>);

    impl ManualClock {
        pub fn new(start_ms: i64) -> Self {
            Self(Rc::new(Cell::new(start_ms)))
        }

        pub fn advance(&self, ms: i64) {
            self.0.set(self.0.get() + ms);
        }

        pub fn set(&self, ms: i64) {
            self.0.set(ms);
        }
    }

    impl Clock for ManualClock {
        fn now_ms(&self) -> i64 {
            self.0.get()
        }
    }
}
