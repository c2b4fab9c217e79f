pub mod chart;
pub mod data;
pub mod generation;
pub mod notify;
pub mod sort;
pub mod transform;
pub mod window;

pub use dashshape_common::record::Record;
