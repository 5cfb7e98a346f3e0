mod sqlite;
pub mod tables;

pub use sqlite::{now_timestamp, Database};
