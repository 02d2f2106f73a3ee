//! Amiibo identifier validation.
//!
//! An amiibo id doubles as the record's file name (`<id>.json`), so it has
//! to be a safe, flat path segment: no traversal sequences or separators,
//! and nothing a host filesystem refuses inside a single entry name.

use thiserror::Error;

/// Characters rejected in identifiers because at least one supported
/// platform refuses them in file names. Enforcing the union keeps a store
/// written on one host readable on another.
const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// Checks that `amiibo_id` is usable as a record file name.
///
/// Both store backends run this before touching any state, so a rejected
/// id never creates a record, a file, or a directory.
pub fn validate_amiibo_id(amiibo_id: &str) -> Result<(), AmiiboIdError> {
    if amiibo_id.is_empty() {
        return Err(AmiiboIdError::Empty);
    }
    if amiibo_id.contains("..") {
        return Err(AmiiboIdError::ParentTraversal);
    }
    for ch in amiibo_id.chars() {
        if ch == '/' || ch == '\\' {
            return Err(AmiiboIdError::PathSeparator(ch));
        }
        if ch.is_ascii_control() {
            return Err(AmiiboIdError::ControlCharacter);
        }
        if INVALID_FILENAME_CHARS.contains(&ch) {
            return Err(AmiiboIdError::InvalidCharacter(ch));
        }
    }
    Ok(())
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmiiboIdError {
    #[error("amiibo id cannot be empty")]
    Empty,

    #[error("amiibo id cannot contain '..'")]
    ParentTraversal,

    #[error("amiibo id cannot contain the path separator '{0}'")]
    PathSeparator(char),

    #[error("amiibo id cannot contain control characters")]
    ControlCharacter,

    #[error("amiibo id cannot contain '{0}'")]
    InvalidCharacter(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_hex_identifiers() {
        assert!(validate_amiibo_id("01000000000c0002").is_ok());
        assert!(validate_amiibo_id("abc123").is_ok());
    }

    #[test]
    fn accepts_identifiers_with_punctuation_filesystems_allow() {
        assert!(validate_amiibo_id("zelda-botw_01").is_ok());
        assert!(validate_amiibo_id("mario.smash").is_ok());
        assert!(validate_amiibo_id("link (totk)").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(validate_amiibo_id(""), Err(AmiiboIdError::Empty));
    }

    #[test]
    fn rejects_parent_traversal() {
        assert_eq!(
            validate_amiibo_id("../../etc/passwd"),
            Err(AmiiboIdError::ParentTraversal)
        );
        assert_eq!(validate_amiibo_id("a..b"), Err(AmiiboIdError::ParentTraversal));
    }

    #[test]
    fn rejects_path_separators() {
        assert_eq!(
            validate_amiibo_id("a/b"),
            Err(AmiiboIdError::PathSeparator('/'))
        );
        assert_eq!(
            validate_amiibo_id("a\\b"),
            Err(AmiiboIdError::PathSeparator('\\'))
        );
    }

    #[test]
    fn rejects_control_characters() {
        assert_eq!(
            validate_amiibo_id("nul\0byte"),
            Err(AmiiboIdError::ControlCharacter)
        );
        assert_eq!(
            validate_amiibo_id("tab\tbyte"),
            Err(AmiiboIdError::ControlCharacter)
        );
    }

    #[test]
    fn rejects_characters_windows_refuses() {
        for bad in ["a:b", "a*b", "a?b", "a\"b", "a<b", "a>b", "a|b"] {
            assert!(
                matches!(
                    validate_amiibo_id(bad),
                    Err(AmiiboIdError::InvalidCharacter(_))
                ),
                "expected '{bad}' to be rejected"
            );
        }
    }

    #[test]
    fn single_dot_is_fine_but_double_dot_is_not() {
        assert!(validate_amiibo_id("v1.2").is_ok());
        assert!(validate_amiibo_id("v1..2").is_err());
    }
}
