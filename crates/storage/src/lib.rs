#![forbid(unsafe_code)]

mod error;
mod query;
mod source;

pub use error::StoreError;
pub use source::SqliteRecordSource;
