#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod ramp;
pub mod time;
pub mod viewport;

pub use error::Error;
pub use time::Clock;
