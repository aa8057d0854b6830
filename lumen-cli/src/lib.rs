pub mod demo;
pub mod pattern;

pub use demo::{DemoOptions, run_demo};
