//! Declarative request validation helpers
//!
//! Request structs declare their constraints with `#[derive(Validate)]`;
//! this module supplies the custom rules and the rendering of failures into
//! a single classified [`AppError::Validation`].

use crate::error::{AppError, Result};
use validator::{Validate, ValidationError, ValidationErrors};

/// Validate a request payload before any database access.
pub fn validate_request<T: Validate>(request: &T) -> Result<()> {
    request.validate().map_err(AppError::from)
}

/// Require the value to be identical to its upper-case rendering.
///
/// Characters compare against their single-character upper-case mapping, so
/// a character that only expands (`ß` to `SS`) is left as is.
pub fn validate_uppercase(value: &str) -> std::result::Result<(), ValidationError> {
    if value.chars().all(is_upper_invariant) {
        Ok(())
    } else {
        Err(ValidationError::new("uppercase"))
    }
}

fn is_upper_invariant(c: char) -> bool {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u == c,
        _ => true,
    }
}

/// Render every failing field constraint, fields in name order.
///
/// Example: `invalid name: uppercase; visible_name: length`
pub fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let codes: Vec<&str> = errs.iter().map(|e| e.code.as_ref()).collect();
            format!("{}: {}", field, codes.join(", "))
        })
        .collect();

    if fields.is_empty() {
        return "invalid request".to_string();
    }

    fields.sort();
    format!("invalid {}", fields.join("; "))
}
