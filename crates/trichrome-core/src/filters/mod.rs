pub mod enhance;
pub mod histogram;
pub mod levels;

pub use enhance::{enhance, EnhanceConfig};
