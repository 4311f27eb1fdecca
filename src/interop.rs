//! Adapters between the core and external consumers.

pub mod round_log;

pub use round_log::{GameLog, LoggedAction, LoggedResult, RoundLog, RoundLogger};
