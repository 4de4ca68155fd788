use std::borrow::Cow;
use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use validator::{ValidationError, ValidationErrors};

lazy_static! {
    /// Regex for validating username fields
    /// Must start with letter or underscore and contain only alphanumeric characters and underscores
    /// - Valid: "john_doe", "user123", "_admin", "JohnDoe"
    /// - Invalid: "123user", "-user", "user-name", "user name"
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();
}

/// Field errors keyed by field name, in the order the form shows them
pub type FormErrors = BTreeMap<String, Vec<String>>;

/// Required-field check: whitespace-only input counts as missing
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required")
            .with_message(Cow::Borrowed("This field is required.")));
    }
    Ok(())
}

/// Required username in [`USERNAME_REGEX`] shape, reported as one message
pub fn username(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    if !USERNAME_REGEX.is_match(value.trim()) {
        return Err(ValidationError::new("username_format").with_message(Cow::Borrowed(
            "Username may only contain letters, digits and underscores",
        )));
    }
    Ok(())
}

/// Select values arrive as strings; a usable id is a positive integer
pub fn positive_id(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(()),
        _ => Err(ValidationError::new("positive_id")
            .with_message(Cow::Borrowed("Please choose a valid option."))),
    }
}

/// Flatten validator output into per-field messages for inline display
pub fn field_messages(errors: &ValidationErrors) -> FormErrors {
    errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("The {} field is invalid.", field))
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
