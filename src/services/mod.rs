//! Scoring, message and recommendation logic. Everything here is pure over
//! its arguments; clocks and randomness are passed in by the handlers.

pub mod history;
pub mod messages;
pub mod recommendations;
pub mod recovery;
pub mod stats;
