//! Shared fixtures for integration tests.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Duration, Local, Utc};
use mockable::Clock;
use std::sync::{Arc, Mutex, PoisonError};
use tempfile::TempDir;

/// Temporary data root removed when dropped.
pub struct TempRoot {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl TempRoot {
    /// Creates an empty temporary root.
    ///
    /// # Panics
    ///
    /// Panics when the temporary directory cannot be created or is not
    /// valid UTF-8.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temporary directory should be created");
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .expect("temporary directory should be UTF-8");
        Self { _dir: dir, path }
    }

    /// Returns the root path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

/// Clock pinned to an instant that tests move by hand.
#[derive(Debug, Clone)]
pub struct SteppedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl SteppedClock {
    /// Creates a clock at an RFC 3339 instant.
    ///
    /// # Panics
    ///
    /// Panics when `instant` is not RFC 3339.
    #[must_use]
    pub fn at(instant: &str) -> Self {
        let parsed = DateTime::parse_from_rfc3339(instant)
            .expect("instant should be RFC 3339")
            .with_timezone(&Utc);
        Self {
            now: Arc::new(Mutex::new(parsed)),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) += by;
    }
}

impl Clock for SteppedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
