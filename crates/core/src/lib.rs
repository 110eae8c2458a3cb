#![forbid(unsafe_code)]

pub mod achievement;
pub mod board;
pub mod error;
pub mod exercises;
pub mod model;
pub mod steps;
pub mod time;

pub use error::CoreError;
pub use time::Clock;
