use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::errors::FieldError;

pub const NAME_MIN_CHARS: usize = 2;
pub const MESSAGE_MIN_CHARS: usize = 10;

pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters.";
pub const EMAIL_INVALID: &str = "Please enter a valid email address.";
pub const MESSAGE_TOO_SHORT: &str = "Message must be at least 10 characters.";

// Local part may not start with a dot or contain consecutive dots; those two
// rules are checked separately since `regex` has no lookaround.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

#[derive(Debug, Clone, Deserialize)]
pub struct ContactMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}

/// Checks every field and reports all failures at once. Lengths count
/// characters of the value as submitted.
pub fn validate_contact(msg: &ContactMessage) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if msg.name.chars().count() < NAME_MIN_CHARS {
        errors.push(FieldError {
            field: "name",
            message: NAME_TOO_SHORT.to_string(),
        });
    }
    if !is_valid_email(&msg.email) {
        errors.push(FieldError {
            field: "email",
            message: EMAIL_INVALID.to_string(),
        });
    }
    if msg.message.chars().count() < MESSAGE_MIN_CHARS {
        errors.push(FieldError {
            field: "message",
            message: MESSAGE_TOO_SHORT.to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(name: &str, email: &str, body: &str) -> ContactMessage {
        ContactMessage {
            name: name.to_string(),
            email: email.to_string(),
            message: body.to_string(),
        }
    }

    #[test]
    fn test_valid_message_passes() {
        assert!(validate_contact(&message("Ada", "ada@example.com", "Hello there!")).is_ok());
    }

    #[test]
    fn test_message_length_boundary() {
        let nine = "123456789";
        let ten = "1234567890";
        let errors = validate_contact(&message("Ada", "ada@example.com", nine)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "message");
        assert_eq!(errors[0].message, MESSAGE_TOO_SHORT);
        assert!(validate_contact(&message("Ada", "ada@example.com", ten)).is_ok());
    }

    #[test]
    fn test_name_length_boundary() {
        assert!(validate_contact(&message("A", "ada@example.com", "long enough")).is_err());
        assert!(validate_contact(&message("Al", "ada@example.com", "long enough")).is_ok());
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        // 2 characters, 4 bytes.
        assert!(validate_contact(&message("éé", "ada@example.com", "ñññññññññ")).is_err());
        assert!(validate_contact(&message("éé", "ada@example.com", "ññññññññññ")).is_ok());
    }

    #[test]
    fn test_all_failures_reported_together() {
        let errors = validate_contact(&message("", "nope", "short")).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "email", "message"]);
    }

    #[test]
    fn test_email_acceptance() {
        for ok in [
            "ada@example.com",
            "first.last+tag@sub.example.co.uk",
            "o'brien@example.ie",
            "x_y-z@a-b.io",
        ] {
            assert!(is_valid_email(ok), "{ok} should be valid");
        }
    }

    #[test]
    fn test_email_rejection() {
        for bad in [
            "",
            "plainaddress",
            "@example.com",
            "ada@",
            "ada@example",
            ".ada@example.com",
            "ada..b@example.com",
            "ada.@example.com",
            "ada@-example.com",
            "ada@example.c",
            "ada @example.com",
        ] {
            assert!(!is_valid_email(bad), "{bad} should be invalid");
        }
    }
}
