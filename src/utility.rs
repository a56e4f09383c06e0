use crate::models::models::AccessOption;
use validator::ValidationError;

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let trimmed = password.trim();

    if trimmed.is_empty() || trimmed.len() < 8 {
        return Err(ValidationError::new(
            "Password cannot be empty and must be at least 8 characters long",
        ));
    }

    let mut has_lowercase = false;
    let mut has_uppercase = false;
    let mut has_digit = false;

    for c in trimmed.chars() {
        if c.is_ascii_lowercase() {
            has_lowercase = true;
        } else if c.is_ascii_uppercase() {
            has_uppercase = true;
        } else if c.is_ascii_digit() {
            has_digit = true;
        }
    }

    if !(has_lowercase && has_uppercase && has_digit) {
        return Err(ValidationError::new(
            "Password must contain at least one uppercase letter, \
             one lowercase letter and one digit",
        ));
    }

    Ok(())
}

/// Access tiers must carry a positive price and a non-negative view count.
/// The update path rejects bad values instead of coercing them to zero.
pub fn validate_access_options(options: &Vec<AccessOption>) -> Result<(), ValidationError> {
    for option in options {
        if option.tier.trim().is_empty() {
            return Err(ValidationError::new("Access option type is required"));
        }
        if option.price <= 0 {
            return Err(ValidationError::new(
                "Access option price must be greater than zero",
            ));
        }
        if option.views < 0 {
            return Err(ValidationError::new(
                "Access option views cannot be negative",
            ));
        }
        if option.validity.trim().is_empty() {
            return Err(ValidationError::new("Access option validity is required"));
        }
    }
    Ok(())
}
