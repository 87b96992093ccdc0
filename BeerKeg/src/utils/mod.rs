//! Utility functions

pub mod cursor;
pub mod path;
pub mod wildcard;

pub use cursor::ByteCursor;
pub use path::{file_extension, file_stem, validate_entry_name};
pub use wildcard::wildcard_match;
