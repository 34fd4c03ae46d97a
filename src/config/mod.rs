pub mod database;
pub mod media;
pub mod rate_limit;
