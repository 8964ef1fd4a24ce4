//! Shared helpers for unit tests.

use chrono::{DateTime, Duration, Local, Utc};
use mockable::Clock;
use std::sync::{Arc, Mutex, PoisonError};

/// Clock that reports a settable instant. Clones share the instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Creates a clock fixed at an RFC 3339 instant.
    pub fn at(instant: &str) -> Self {
        let parsed = DateTime::parse_from_rfc3339(instant)
            .expect("test instant should be RFC 3339")
            .with_timezone(&Utc);
        Self {
            now: Arc::new(Mutex::new(parsed)),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
