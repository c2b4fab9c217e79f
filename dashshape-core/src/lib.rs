pub mod spec;

pub use dashshape_common::error;
pub use dashshape_common::record;
