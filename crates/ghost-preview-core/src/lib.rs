pub mod metrics;
pub mod range;
pub mod theme;
