// Validation utilities module
// Shared presence checks for required request fields

use validator::{ValidationError, ValidationErrors};

/// Checks that every named field is present and non-empty
///
/// Missing and empty values are treated the same way, so `""` and an
/// absent field both produce a 400 for that field.
pub fn require_fields(fields: &[(&'static str, Option<&str>)]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    for (name, value) in fields {
        match value {
            Some(v) if !v.trim().is_empty() => {}
            _ => errors.add(name, ValidationError::new("required")),
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
