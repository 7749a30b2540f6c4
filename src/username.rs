//! Owner name validation
//!
//! Owners follow the usual hosted-account naming rules: 1 to 39 ASCII
//! alphanumeric characters or single hyphens, never starting or ending with a
//! hyphen.

use thiserror::Error;

pub const MAX_LEN: usize = 39;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("username cannot be empty")]
    Empty,

    #[error("username is longer than {} characters", MAX_LEN)]
    TooLong,

    #[error("username contains invalid character {0:?}")]
    InvalidChar(char),

    #[error("username cannot start or end with a hyphen")]
    EdgeHyphen,

    #[error("username cannot contain consecutive hyphens")]
    DoubleHyphen,
}

pub fn validate_username(name: &str) -> Result<(), UsernameError> {
    if name.is_empty() {
        return Err(UsernameError::Empty);
    }
    if name.len() > MAX_LEN {
        return Err(UsernameError::TooLong);
    }
    if let Some(c) = name.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '-') {
        return Err(UsernameError::InvalidChar(c));
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err(UsernameError::EdgeHyphen);
    }
    if name.contains("--") {
        return Err(UsernameError::DoubleHyphen);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_names() {
        for name in ["octocat", "a", "user-42", "ABC123"] {
            assert_eq!(validate_username(name), Ok(()), "{name}");
        }
        assert_eq!(validate_username(&"x".repeat(MAX_LEN)), Ok(()));
    }

    #[test]
    fn rejects_malformed_names() {
        assert_eq!(validate_username(""), Err(UsernameError::Empty));
        assert_eq!(validate_username(&"x".repeat(MAX_LEN + 1)), Err(UsernameError::TooLong));
        assert_eq!(validate_username("bad name"), Err(UsernameError::InvalidChar(' ')));
        assert_eq!(validate_username("under_score"), Err(UsernameError::InvalidChar('_')));
        assert_eq!(validate_username("-lead"), Err(UsernameError::EdgeHyphen));
        assert_eq!(validate_username("trail-"), Err(UsernameError::EdgeHyphen));
        assert_eq!(validate_username("dou--ble"), Err(UsernameError::DoubleHyphen));
    }

    #[test]
    fn error_messages_name_the_problem() {
        assert_eq!(
            UsernameError::TooLong.to_string(),
            "username is longer than 39 characters"
        );
        assert_eq!(
            UsernameError::InvalidChar('_').to_string(),
            "username contains invalid character '_'"
        );
    }
}
