//! Scheduled polling of the Radar API into the store
//!
//! [`PollJob`] is the per-tick unit of work; [`PollWorker`] drives it on a
//! fixed interval with graceful shutdown.

pub mod job;
pub mod worker;

pub use job::{format_report, JobError, JobReport, PollJob};
pub use worker::PollWorker;
