//! Numeric validation functions

use std::fmt::Display;

/// Validates minimum value for numeric types
pub fn validate_min<T: PartialOrd + Display>(value: T, min: T) -> Result<(), String> {
    if value >= min {
        Ok(())
    } else {
        Err(format!("Must be at least {}", min))
    }
}

/// Validates maximum value for numeric types
pub fn validate_max<T: PartialOrd + Display>(value: T, max: T) -> Result<(), String> {
    if value <= max {
        Ok(())
    } else {
        Err(format!("Must be at most {}", max))
    }
}

/// Validates value is within an inclusive range
pub fn validate_range<T: PartialOrd + Display>(value: T, min: T, max: T) -> Result<(), String> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(format!("Must be between {} and {}", min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_validation() {
        assert!(validate_min(25, 18).is_ok());
        assert!(validate_min(18, 18).is_ok());
        assert!(validate_min(17, 18).is_err());

        assert!(validate_min(18.5, 18.0).is_ok());
        assert!(validate_min(17.9, 18.0).is_err());
    }

    #[test]
    fn test_max_validation() {
        assert!(validate_max(5, 10).is_ok());
        assert!(validate_max(10, 10).is_ok());
        assert!(validate_max(15, 10).is_err());
    }

    #[test]
    fn test_range_validation() {
        assert!(validate_range(20u8, 20, 40).is_ok());
        assert!(validate_range(40u8, 20, 40).is_ok());
        assert!(validate_range(19u8, 20, 40).is_err());
        assert!(validate_range(41u8, 20, 40).is_err());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(validate_min(3, 5).unwrap_err(), "Must be at least 5");
        assert_eq!(
            validate_range(0, 1, 10).unwrap_err(),
            "Must be between 1 and 10"
        );
    }
}
