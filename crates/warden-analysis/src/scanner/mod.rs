//! Scanner subsystem — language detection and the thin parse layer the
//! normalizers walk. File discovery and I/O are the caller's concern;
//! source text arrives already materialized in memory.

pub mod language;
pub mod parse;

pub use language::Language;
pub use parse::parse_source;
