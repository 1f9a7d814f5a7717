//! Request-field validation helpers shared by the flashcard handlers.
//!
//! These are deliberately non-throwing predicates: a value that merely fails
//! validation returns `Ok(false)` so the calling handler keeps full control
//! of the user-facing message. Errors are reserved for contract violations
//! in the arguments themselves (bad bounds, malformed top-level shapes).

use serde_json::Value;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid values for \"min\" or \"max\"")]
    InvalidBounds { min: usize, max: usize },
    #[error("\"arr\" parameter must be an array of objects")]
    NotAnArrayOfObjects,
}

/// Check that a value is a string whose trimmed length lies in `[min, max]`
/// inclusive. Non-strings are `Ok(false)`; `min > max` is a contract error.
pub fn is_str_between(value: &Value, min: usize, max: usize) -> Result<bool, ValidationError> {
    if min > max {
        return Err(ValidationError::InvalidBounds { min, max });
    }

    Ok(match value {
        Value::String(s) => {
            let len = s.trim().chars().count();
            len >= min && len <= max
        }
        _ => false,
    })
}

/// Check that every element of `arr` is an object carrying every key in
/// `keys` with a non-empty value: strings must be non-empty after trimming,
/// anything else must be truthy. A missing key is a plain `Ok(false)`; only
/// a non-object element is an error.
pub fn array_of_objects_contain_keys(arr: &[Value], keys: &[&str]) -> Result<bool, ValidationError> {
    if !arr.iter().all(|entry| entry.is_object()) {
        return Err(ValidationError::NotAnArrayOfObjects);
    }

    Ok(arr.iter().all(|obj| {
        keys.iter().all(|key| match obj.get(*key) {
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(other) => is_truthy(other),
            None => false,
        })
    }))
}

/// JavaScript-style truthiness: null, false, 0 and "" are falsy; arrays and
/// objects (even empty ones) are truthy. Strings are NOT trimmed here.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
