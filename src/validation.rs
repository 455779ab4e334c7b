//! Phone number and email address syntax checks.
//!
//! Accepted grammars:
//! - phone: optional leading `+`, then 7 to 15 ASCII digits
//! - email: `local@domain`, local part up to 64 characters of the RFC 5322
//!   atom set (dots allowed between atoms), domain made of at least two
//!   dot-separated labels of letters, digits and inner hyphens; 254 characters
//!   overall at most

use regex::Regex;
use std::sync::LazyLock;

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone pattern compiles"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@([A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?$",
    )
    .expect("email pattern compiles")
});

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_PART_LEN: usize = 64;

/// Input that failed a syntax check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid phone number {0:?}")]
    Phone(String),

    #[error("invalid email address {0:?}")]
    Email(String),
}

impl ValidationError {
    /// Context line used in the HTTP error body.
    pub fn description(&self) -> &'static str {
        match self {
            ValidationError::Phone(_) => "error while validating phone number",
            ValidationError::Email(_) => "error while validating email",
        }
    }
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE.is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::Phone(phone.to_string()))
    }
}

pub fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    let local_ok = email
        .split_once('@')
        .is_some_and(|(local, _)| local.len() <= MAX_LOCAL_PART_LEN);

    if email.len() <= MAX_EMAIL_LEN && local_ok && EMAIL.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::Email(email.to_string()))
    }
}

/// Request messages that carry contact fields.
///
/// Messages without a phone or email field keep the default `None`.
pub trait Contact {
    fn phone(&self) -> Option<&str> {
        None
    }

    fn email(&self) -> Option<&str> {
        None
    }
}

/// Validate every contact field a message carries, phone first.
/// Stops at the first failure.
pub fn validate_contact<T: Contact + ?Sized>(message: &T) -> Result<(), ValidationError> {
    if let Some(phone) = message.phone() {
        validate_phone(phone)?;
    }
    if let Some(email) = message.email() {
        validate_email_address(email)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_phones() {
        for phone in ["+998901234567", "1234567", "123456789012345", "+1234567"] {
            assert!(validate_phone(phone).is_ok(), "{phone} should be valid");
        }
    }

    #[test]
    fn test_invalid_phones() {
        for phone in [
            "",
            "abc",
            "123456",
            "1234567890123456",
            "++1234567",
            "+99 890 123",
            "99890-1234",
            "１２３４５６７",
        ] {
            assert_eq!(
                validate_phone(phone),
                Err(ValidationError::Phone(phone.to_string())),
                "{phone} should be rejected"
            );
        }
    }

    #[test]
    fn test_valid_emails() {
        for email in [
            "john@example.com",
            "john.doe+shop@mail.example.co",
            "a_b-c@sub-domain.example.org",
            "x@y.io",
        ] {
            assert!(validate_email_address(email).is_ok(), "{email} should be valid");
        }
    }

    #[test]
    fn test_invalid_emails() {
        let long_local = format!("{}@example.com", "a".repeat(65));
        let long_total = format!("user@{}.com", "d".repeat(250));
        for email in [
            "",
            "plainaddress",
            "@example.com",
            "john@",
            "john@localhost",
            "john..doe@example.com",
            ".john@example.com",
            "john@-example.com",
            "john@example..com",
            "john doe@example.com",
            long_local.as_str(),
            long_total.as_str(),
        ] {
            assert!(
                validate_email_address(email).is_err(),
                "{email} should be rejected"
            );
        }
    }

    struct Person {
        phone: String,
        email: String,
    }

    impl Contact for Person {
        fn phone(&self) -> Option<&str> {
            Some(&self.phone)
        }

        fn email(&self) -> Option<&str> {
            Some(&self.email)
        }
    }

    struct Anonymous;

    impl Contact for Anonymous {}

    #[test]
    fn test_contact_checks_phone_before_email() {
        let person = Person {
            phone: "abc".to_string(),
            email: "nope".to_string(),
        };
        assert_eq!(
            validate_contact(&person),
            Err(ValidationError::Phone("abc".to_string()))
        );

        let person = Person {
            phone: "+998901234567".to_string(),
            email: "nope".to_string(),
        };
        assert_eq!(
            validate_contact(&person),
            Err(ValidationError::Email("nope".to_string()))
        );
    }

    #[test]
    fn test_contact_without_fields_passes() {
        assert!(validate_contact(&Anonymous).is_ok());
    }
}
