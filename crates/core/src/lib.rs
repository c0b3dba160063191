#![forbid(unsafe_code)]

pub mod command;
pub mod error;
pub mod ids;
pub mod source;
pub mod tree;
pub mod widget;

pub use error::{TextField, TreeError};
