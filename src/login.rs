use thiserror::Error;
use tracing::{info, warn};

pub const DEMO_EMAIL: &str = "GREEN@gmail.com";
pub const DEMO_PASSWORD: &str = "123456";
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Invalid credentials. Try the demo: GREEN@gmail.com / 123456")]
    InvalidCredentials,
}

/// Loose `local@domain.tld` shape check: something, an `@`, then a dot with text on both sides
pub fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rfind('.') {
        Some(dot) => dot > 0 && dot + 1 < domain.len(),
        None => false,
    }
}

/// Demo gate. The email compares case-insensitively, the password exactly.
pub fn authenticate(email: &str, password: &str) -> Result<(), LoginError> {
    let email = email.trim();
    if !looks_like_email(email) {
        return Err(LoginError::InvalidEmail);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(LoginError::PasswordTooShort);
    }
    if email.eq_ignore_ascii_case(DEMO_EMAIL) && password == DEMO_PASSWORD {
        info!("demo login accepted");
        Ok(())
    } else {
        warn!("rejected login attempt");
        Err(LoginError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_credentials_pass() {
        assert_eq!(authenticate("GREEN@gmail.com", "123456"), Ok(()));
        assert_eq!(authenticate("  green@GMAIL.com ", "123456"), Ok(()));
    }

    #[test]
    fn password_is_case_sensitive_and_exact() {
        assert_eq!(
            authenticate("green@gmail.com", "1234567"),
            Err(LoginError::InvalidCredentials)
        );
    }

    #[test]
    fn validation_order() {
        assert_eq!(authenticate("not-an-email", "1"), Err(LoginError::InvalidEmail));
        assert_eq!(authenticate("a@b.c", "12345"), Err(LoginError::PasswordTooShort));
        assert_eq!(authenticate("a@b.c", "123456"), Err(LoginError::InvalidCredentials));
    }

    #[test]
    fn email_shape() {
        assert!(looks_like_email("a@b.c"));
        assert!(looks_like_email("first.last@mail.example.org"));
        assert!(!looks_like_email("@b.c"));
        assert!(!looks_like_email("a@.c"));
        assert!(!looks_like_email("a@b."));
        assert!(!looks_like_email("a@bc"));
        assert!(!looks_like_email(""));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            LoginError::InvalidCredentials.to_string(),
            "Invalid credentials. Try the demo: GREEN@gmail.com / 123456"
        );
        assert_eq!(
            LoginError::PasswordTooShort.to_string(),
            "Password must be at least 6 characters"
        );
    }
}
