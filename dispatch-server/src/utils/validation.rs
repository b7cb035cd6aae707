//! Input validation helpers
//!
//! Centralized text length constants and validation functions. Requests are
//! deserialized into typed structs before they reach business logic; these
//! helpers cover what the type system cannot (emptiness, lengths, ranges).

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Display names: restaurant names, rider names, dish names
pub const MAX_NAME_LEN: usize = 200;

/// Free-text order item descriptions
pub const MAX_ITEMS_LEN: usize = 500;

/// Caller-supplied order identifiers
pub const MAX_ORDER_ID_LEN: usize = 64;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Minimum password length accepted at signup
pub const MIN_PASSWORD_LEN: usize = 6;

// ── Preparation time bounds (minutes, inclusive) ────────────────────

pub const MIN_PREP_TIME: i64 = 1;
pub const MAX_PREP_TIME: i64 = 120;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate an email address: required, length-limited, plausible shape.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    let Some((local, domain)) = email.split_once('@') else {
        return Err(AppError::validation("email is not a valid address"));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(AppError::validation("email is not a valid address"));
    }
    Ok(())
}

/// Validate a signup password.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation("password is too long"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_blank() {
        assert!(validate_required_text("  ", "items", MAX_ITEMS_LEN).is_err());
        assert!(validate_required_text("2x Burger", "items", MAX_ITEMS_LEN).is_ok());
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("mario@trattoria.example").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("@nodomain").is_err());
        assert!(validate_email("user@tld").is_err());
    }
}
