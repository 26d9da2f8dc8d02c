//! Job lifecycle tracking.
//!
//! A job moves through `pending -> processing -> completed | failed` on the
//! remote service. [`JobTracker`] submits a command once and then polls at a
//! fixed interval until it sees a terminal state or its deadline expires.
//!
//! Time is read through the [`Clock`] trait so wait loops can run against a
//! virtual clock in tests.

mod clock;
mod error;
mod tracker;

pub use clock::{Clock, SystemClock};
pub use error::JobError;
pub use tracker::{JobTracker, WaitOptions};
