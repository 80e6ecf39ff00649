pub mod health;
pub mod messages;
pub mod recommendations;
pub mod recovery;
pub mod stats;
