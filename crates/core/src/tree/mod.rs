#![forbid(unsafe_code)]

mod build;
mod types;

pub use build::build;
pub use types::*;
