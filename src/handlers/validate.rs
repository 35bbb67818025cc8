//! Input checks shared by the registration and login handlers. All checks
//! run before any store access; every violated field is reported at once.

use crate::error::FieldError;

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Basic structural email check: exactly one `@` with a dotted,
/// non-empty domain part.
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };

    if local.is_empty() || domain.is_empty() {
        return false;
    }

    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Validate a registration payload, collecting every violation.
pub fn registration_errors(name: &str, email: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }
    if !is_valid_email(email) {
        errors.push(FieldError::new("email", "Please provide a valid email"));
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        errors.push(FieldError::new(
            "password",
            "Please enter a password with 6 or more characters",
        ));
    }

    errors
}

/// Validate a login payload: well-formed email, password present.
pub fn login_errors(email: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !is_valid_email(email) {
        errors.push(FieldError::new("email", "Please provide a valid email"));
    }
    if password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    }

    errors
}

/// Validate post or comment text.
pub fn text_errors(text: &str) -> Vec<FieldError> {
    if text.trim().is_empty() {
        vec![FieldError::new("text", "Text is required")]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("ann@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("ann"));
        assert!(!is_valid_email("ann@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ann@example"));
        assert!(!is_valid_email("ann@ex@ample.com"));
        assert!(!is_valid_email("ann@.example.com"));
    }

    #[test]
    fn registration_reports_all_violations_at_once() {
        let errors = registration_errors("", "bad-email", "123");
        let params: Vec<&str> = errors.iter().map(|e| e.param.as_str()).collect();
        assert_eq!(params, vec!["name", "email", "password"]);
    }

    #[test]
    fn registration_passes_clean_input() {
        assert!(registration_errors("Ann", "ann@example.com", "secret1").is_empty());
    }

    #[test]
    fn password_boundary_is_six_characters() {
        assert!(registration_errors("Ann", "ann@example.com", "12345").len() == 1);
        assert!(registration_errors("Ann", "ann@example.com", "123456").is_empty());
    }

    #[test]
    fn text_must_be_non_blank() {
        assert_eq!(text_errors("   ").len(), 1);
        assert!(text_errors("hello").is_empty());
    }
}
