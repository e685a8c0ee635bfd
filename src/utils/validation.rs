use crate::utils::error_handling::{LayoutError, LayoutResult};
use crate::utils::limits::MAX_ELEMENT_BYTE_WIDTH;
use std::collections::HashSet;

/// Validate a section or field name
pub fn validate_name(name: &str, kind: &str) -> LayoutResult<()> {
    if name.is_empty() {
        return Err(LayoutError::ConfigError(format!("{} name cannot be empty", kind)));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(LayoutError::ConfigError(format!(
            "{} name '{}' contains characters outside [A-Za-z0-9_-]",
            kind, name
        )));
    }
    Ok(())
}

/// Validate a declared element width (must be >= 1)
pub fn validate_element_width(section: &str, width: i64) -> LayoutResult<usize> {
    if width < 1 {
        return Err(LayoutError::ConfigError(format!(
            "section '{}' declares element width {}, must be at least 1",
            section, width
        )));
    }
    let width = usize::try_from(width).map_err(|_| {
        LayoutError::ConfigError(format!(
            "section '{}' element width {} does not fit in usize",
            section, width
        ))
    })?;
    if width > MAX_ELEMENT_BYTE_WIDTH {
        return Err(LayoutError::ConfigError(format!(
            "section '{}' element width {} exceeds maximum {}",
            section, width, MAX_ELEMENT_BYTE_WIDTH
        )));
    }
    Ok(width)
}

/// Validate a declared element count (must be >= 0)
pub fn validate_element_count(section: &str, count: i64) -> LayoutResult<usize> {
    if count < 0 {
        return Err(LayoutError::ConfigError(format!(
            "section '{}' declares element count {}, must not be negative",
            section, count
        )));
    }
    usize::try_from(count).map_err(|_| {
        LayoutError::ConfigError(format!(
            "section '{}' element count {} does not fit in usize",
            section, count
        ))
    })
}

/// Validate that no name appears twice
pub fn validate_unique_names<'a, I>(names: I, kind: &str) -> LayoutResult<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(LayoutError::ConfigError(format!(
                "duplicate {} name '{}'",
                kind, name
            )));
        }
    }
    Ok(())
}

/// Validate a half-open element range
pub fn validate_range_bounds(field: &str, start: usize, end: usize) -> LayoutResult<()> {
    if start >= end {
        return Err(LayoutError::ConfigError(format!(
            "field '{}' selects empty range {}..{}",
            field, start, end
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_must_be_positive() {
        assert!(validate_element_width("wires_cap", 0).is_err());
        assert!(validate_element_width("wires_cap", -8).is_err());
        assert_eq!(validate_element_width("wires_cap", 32), Ok(32));
    }

    #[test]
    fn count_may_be_zero() {
        assert_eq!(validate_element_count("lookups", 0), Ok(0));
        assert!(validate_element_count("lookups", -1).is_err());
    }

    #[test]
    fn duplicates_are_rejected() {
        assert!(validate_unique_names(["a", "b", "c"], "section").is_ok());
        let err = validate_unique_names(["a", "b", "a"], "section").unwrap_err();
        assert!(err.to_string().contains("duplicate section name 'a'"));
    }

    #[test]
    fn names_are_restricted() {
        assert!(validate_name("plonk_zs-next", "section").is_ok());
        assert!(validate_name("", "section").is_err());
        assert!(validate_name("wires cap", "section").is_err());
    }
}
