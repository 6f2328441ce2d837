//! String validation functions

/// Number of characters in `s`.
///
/// Lengths are counted in characters, not bytes, so `"Élise"` is five long.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Validates minimum string length
pub fn validate_min_length(s: &str, min: usize) -> Result<(), String> {
    if char_len(s) >= min {
        Ok(())
    } else {
        Err(format!("Must be at least {} characters", min))
    }
}

pub fn validate_max_length(s: &str, max: usize) -> Result<(), String> {
    if char_len(s) <= max {
        Ok(())
    } else {
        Err(format!("Must be at most {} characters", max))
    }
}

pub fn validate_exact_length(s: &str, len: usize) -> Result<(), String> {
    if char_len(s) == len {
        Ok(())
    } else {
        Err(format!("Must be exactly {} characters", len))
    }
}

pub fn starts_with(s: &str, prefix: &str) -> bool {
    s.starts_with(prefix)
}

/// Checks that the first character of `s` is `initial`.
///
/// An empty string has no first character and never matches.
pub fn starts_with_char(s: &str, initial: char) -> bool {
    s.chars().next() == Some(initial)
}

/// Enum/value restriction
pub fn is_one_of<S: AsRef<str>>(value: &str, allowed: &[S]) -> bool {
    allowed.iter().any(|a| a.as_ref() == value)
}
