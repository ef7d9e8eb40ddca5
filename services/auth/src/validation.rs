//! Input validation for the login and registration forms
//!
//! Everything here runs before any network call.

/// Shortest password the registration form accepts
pub const MIN_PASSWORD_LENGTH: usize = 6;

const MISSING_FIELDS: &str = "Please fill in every field";

/// Validate login input; `email` is expected already trimmed
pub fn validate_login(email: &str, password: &str) -> Result<(), String> {
    if email.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS.to_string());
    }

    Ok(())
}

/// Validate registration input; `email` is expected already trimmed
pub fn validate_registration(
    email: &str,
    password: &str,
    password_confirm: &str,
) -> Result<(), String> {
    if email.is_empty() || password.is_empty() || password_confirm.is_empty() {
        return Err(MISSING_FIELDS.to_string());
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        ));
    }

    if password != password_confirm {
        return Err("Passwords do not match".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_both_fields() {
        assert!(validate_login("", "secret").is_err());
        assert!(validate_login("ana@example.com", "").is_err());
        assert!(validate_login("ana@example.com", "secret").is_ok());
    }

    #[test]
    fn test_registration_rules_in_order() {
        assert_eq!(
            validate_registration("ana@example.com", "abc", ""),
            Err(MISSING_FIELDS.to_string())
        );
        assert_eq!(
            validate_registration("ana@example.com", "abc", "abd"),
            Err("Password must be at least 6 characters long".to_string())
        );
        assert_eq!(
            validate_registration("ana@example.com", "secret1", "secret2"),
            Err("Passwords do not match".to_string())
        );
        assert!(validate_registration("ana@example.com", "secret", "secret").is_ok());
    }

    #[test]
    fn test_password_length_counts_characters() {
        // Six characters, more than six bytes
        assert!(validate_registration("ana@example.com", "ñañañá", "ñañañá").is_ok());
        assert!(validate_registration("ana@example.com", "ñañañ", "ñañañ").is_err());
    }
}
