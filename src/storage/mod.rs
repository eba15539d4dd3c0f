//! # Statement Storage
//!
//! [`FilesystemStorage`] writes a finished statement to a file atomically.
//! Other destinations implement [`StatementStore`].

pub mod filesystem;
pub mod traits;

pub use filesystem::{FilesystemStorage, persist_statement};
pub use traits::StatementStore;
