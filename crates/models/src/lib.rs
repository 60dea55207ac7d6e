pub mod conflict;
pub mod profile;
pub mod time_block;
pub mod timestamp;

#[cfg(feature = "database")]
mod value;
