//! Collection validation functions

/// Validates minimum number of items in a collection
pub fn validate_min_items(len: usize, min: usize) -> Result<(), String> {
    if len >= min {
        Ok(())
    } else {
        Err(format!("Must have at least {} items", min))
    }
}

/// Validates maximum number of items in a collection
pub fn validate_max_items(len: usize, max: usize) -> Result<(), String> {
    if len <= max {
        Ok(())
    } else {
        Err(format!("Must have at most {} items", max))
    }
}
