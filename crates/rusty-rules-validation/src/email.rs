//! Email validation functions

/// Validates email format
///
/// When the `rfc-email` feature is enabled, uses RFC 5322 compliant validation.
/// Otherwise checks for:
/// - Exactly one '@' symbol with content on both sides
/// - At least one '.' in the domain part, not at either end, no ".."
/// - A top-level domain of at least 2 characters
#[cfg(feature = "rfc-email")]
pub fn is_valid_email(email: &str) -> bool {
    email_address::EmailAddress::is_valid(email)
}

#[cfg(not(feature = "rfc-email"))]
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < 3 {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if domain.contains('@') {
        return false;
    }

    if local.is_empty() || local.len() > 64 {
        return false;
    }

    if domain.is_empty() || domain.len() > 255 || !domain.contains('.') {
        return false;
    }

    // Domain can't start or end with dot or hyphen
    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return false;
    }

    if domain.contains("..") {
        return false;
    }

    let valid_local_chars =
        |c: char| c.is_alphanumeric() || c == '.' || c == '_' || c == '-' || c == '+';
    if !local.chars().all(valid_local_chars) {
        return false;
    }

    let valid_domain_chars = |c: char| c.is_alphanumeric() || c == '.' || c == '-';
    if !domain.chars().all(valid_domain_chars) {
        return false;
    }

    // TLD must be at least 2 characters
    match domain.rsplit_once('.') {
        Some((_, tld)) => tld.chars().count() >= 2,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("jdoe@mail.com"));
        assert!(is_valid_email("test.user@example.co.uk"));
        assert!(is_valid_email("user+tag@example.com"));
        assert!(is_valid_email("user_name@example-domain.com"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("@"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("jdoe"));
    }

    #[cfg(not(feature = "rfc-email"))]
    #[test]
    fn test_invalid_domains() {
        // dotless domains are valid under RFC 5322
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@example..com"));
        assert!(!is_valid_email("user@example.c"));
    }
}
