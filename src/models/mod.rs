pub mod daily_log;
pub mod message;
pub mod recommendation;
