//! Input validation for account fields

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

// +2519XXXXXXXX, +2517XXXXXXXX, 09XXXXXXXX or 07XXXXXXXX
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+251|0)[79]\d{8}$").expect("Invalid phone regex"));

pub const MAX_EMAIL_LEN: usize = 254;
pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 100;
pub const MIN_PASSWORD_LEN: usize = 8;

const WEAK_PASSWORDS: [&str; 8] = [
    "password1",
    "password123",
    "qwerty123",
    "admin123",
    "abcd1234",
    "welcome1",
    "falcon123",
    "letmein1",
];

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.len() > MAX_EMAIL_LEN || !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_full_name(full_name: &str) -> Result<(), &'static str> {
    let len = full_name.trim().chars().count();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return Err("Full name must be between 2 and 100 characters");
    }
    if full_name.chars().any(|c| c.is_control()) {
        return Err("Full name contains invalid characters");
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();
    if !PHONE_RE.is_match(&compact) {
        return Err("Phone number must be an Ethiopian mobile number (+2519XXXXXXXX or 09XXXXXXXX)");
    }
    Ok(())
}

/// Every rule the password breaks; empty when it is acceptable
pub fn password_violations(password: &str) -> Vec<&'static str> {
    let mut errors = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }
    if WEAK_PASSWORDS
        .iter()
        .any(|weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    errors
}

pub fn validate_password(password: &str) -> Result<(), String> {
    let violations = password_violations(password);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations.join("; "))
    }
}

/// Trimmed text whose length in characters lies within `min..=max`
pub fn validate_text_len(
    value: &str,
    field: &str,
    min: usize,
    max: usize,
) -> Result<(), String> {
    let len = value.trim().chars().count();
    if len < min || len > max {
        return Err(format!("{field} must be between {min} and {max} characters"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("abebe.kebede@falcon.edu.et").is_ok());
        assert!(validate_email("no-at-sign.example.com").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("Falcon2026").is_ok());
        let violations = password_violations("abc");
        assert!(violations.contains(&"Password must be at least 8 characters long"));
        assert!(violations.contains(&"Password must contain at least one uppercase letter"));
        assert!(violations.contains(&"Password must contain at least one digit"));
        assert!(validate_password("Password123").is_err());
    }

    #[test]
    fn test_full_name() {
        assert!(validate_full_name("Hanna Tesfaye").is_ok());
        assert!(validate_full_name(" H ").is_err());
        assert!(validate_full_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_phone() {
        assert!(validate_phone("+251911223344").is_ok());
        assert!(validate_phone("0911 22 33 44").is_ok());
        assert!(validate_phone("0711223344").is_ok());
        assert!(validate_phone("12345").is_err());
    }

    #[test]
    fn test_text_len() {
        assert!(validate_text_len("Essay", "Title", 1, 200).is_ok());
        assert_eq!(
            validate_text_len("   ", "Title", 1, 200).unwrap_err(),
            "Title must be between 1 and 200 characters"
        );
    }
}
