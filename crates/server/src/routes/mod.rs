pub mod auth;
pub mod building;
pub mod health;
pub mod lecturer;
pub mod reservation;
pub mod room;
pub mod schedule;
