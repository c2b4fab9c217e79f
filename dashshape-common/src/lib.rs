#[macro_use]
extern crate lazy_static;

pub mod coerce;
pub mod error;
pub mod record;

pub use chrono;
pub use serde_json;
