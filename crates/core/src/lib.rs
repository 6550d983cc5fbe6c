#![forbid(unsafe_code)]

pub mod error;
pub mod export;
pub mod filter;
pub mod model;
pub mod progress;
pub mod time;

pub use error::ContentError;
pub use time::Clock;
