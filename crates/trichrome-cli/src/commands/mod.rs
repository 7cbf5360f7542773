pub mod align;
pub mod batch;
pub mod config;
mod options;
