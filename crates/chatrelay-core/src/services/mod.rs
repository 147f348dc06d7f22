//! Application services built on the pipeline and ports.

pub mod relay;

pub use relay::ChatRelay;
