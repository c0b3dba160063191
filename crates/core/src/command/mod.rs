#![forbid(unsafe_code)]

mod bind;
mod emit;
mod escape;
mod script;
mod types;

pub use bind::*;
pub use emit::emit;
pub use escape::{is_transport_safe, js_string};
pub use script::{EXECUTE_FN, render_script};
pub use types::*;

#[cfg(test)]
mod tests;
