//! Port traits abstracting the environment away from the façade.

use chrono::NaiveDateTime;
use std::fmt::Debug;

/// Wall clock used to stamp backups.
pub trait Clock: Debug + Send + Sync {
    /// Current local time.
    fn now(&self) -> NaiveDateTime;
}
