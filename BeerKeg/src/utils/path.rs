//! Path utilities for archive entry names

use std::path::{Component, Path};

use crate::error::{Error, Result};

/// Extension of an entry name, without the dot (`"LEVEL1.SND"` -> `"SND"`).
#[must_use]
pub fn file_extension(name: &str) -> Option<&str> {
    Path::new(name).extension().and_then(|e| e.to_str())
}

/// Entry name without its extension (`"LEVEL1.SND"` -> `"LEVEL1"`).
#[must_use]
pub fn file_stem(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
}

/// Make sure an entry name is a single plain file name.
///
/// Names end up joined onto the output root, so anything that would escape it
/// (separators, `..`, absolute paths) or that names no file at all is rejected.
pub fn validate_entry_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let is_plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );

    if !is_plain || name.contains(['/', '\\']) {
        return Err(Error::InvalidEntryName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_and_extension() {
        assert_eq!(file_stem("LEVEL1.SND"), "LEVEL1");
        assert_eq!(file_extension("LEVEL1.SND"), Some("SND"));
        assert_eq!(file_stem("README"), "README");
        assert_eq!(file_extension("README"), None);
    }

    #[test]
    fn test_validate_entry_name() {
        assert!(validate_entry_name("TEST.SND").is_ok());
        assert!(validate_entry_name("").is_err());
        assert!(validate_entry_name("..").is_err());
        assert!(validate_entry_name("../X.BIN").is_err());
        assert!(validate_entry_name("A/B.BIN").is_err());
        assert!(validate_entry_name("A\\B.BIN").is_err());
        assert!(validate_entry_name("/ABS").is_err());
    }
}
