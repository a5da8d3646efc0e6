pub mod db;
pub mod models;
mod sections;
mod tables;
mod uploads;
mod users;

pub use db::{Database, DatabaseError, PurgeStats};
pub use sections::sort_sections;
pub use tables::*;
