//! Types shared by the record server, the storage layer and album clients.

pub mod domain;
pub mod error;
pub mod protocol;
pub mod record;

pub use record::DecodeError;
