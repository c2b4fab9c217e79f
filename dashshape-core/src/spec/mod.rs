pub mod aggregate;
pub mod chart;
pub mod filter;
pub mod pipeline;
pub mod sort;
pub mod viewport;
