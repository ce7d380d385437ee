pub mod common;
pub mod timezones;
