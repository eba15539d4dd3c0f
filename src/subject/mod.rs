//! # Subject Resolution
//!
//! Determines the names and content digests of the artifacts a statement
//! attests to: container images ([`resolve_subjects`]) or files on disk
//! ([`resolve_file_subjects`]).

pub mod container;
pub mod files;

pub use container::resolve_subjects;
pub use files::resolve_file_subjects;
