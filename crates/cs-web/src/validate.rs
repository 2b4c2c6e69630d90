//! Local input rules checked before any remote call.
//!
//! Each check returns the first failing rule's message as
//! [`WebError::Validation`].

use crate::error::{WebError, WebResult};
use crate::service::{RegistrationForm, SupportTicket};

/// Minimum password length accepted at login.
pub const LOGIN_PASSWORD_MIN: usize = 6;
/// Minimum password length accepted at registration.
pub const REGISTER_PASSWORD_MIN: usize = 8;
/// Allowed username length at registration, in characters.
pub const USERNAME_LENGTH: std::ops::RangeInclusive<usize> = 3..=20;

/// Whether `email` looks like `local@domain.tld`.
///
/// One `@`, no whitespace, a non-empty local part, and a domain made of at
/// least two non-empty dot-separated labels.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}

/// Check a login attempt. An identifier containing `@` is treated as an email.
pub fn validate_login(identifier: &str, password: &str) -> WebResult<()> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(WebError::validation("Please enter your email or username"));
    }
    if identifier.contains('@') && !is_valid_email(identifier) {
        return Err(WebError::validation("Please enter a valid email address"));
    }
    if password.chars().count() < LOGIN_PASSWORD_MIN {
        return Err(WebError::validation(format!(
            "Password must be at least {LOGIN_PASSWORD_MIN} characters long"
        )));
    }
    Ok(())
}

/// Check a registration form in rule order, stopping at the first failure.
pub fn validate_registration(form: &RegistrationForm) -> WebResult<()> {
    let username = form.username.trim();
    if !USERNAME_LENGTH.contains(&username.chars().count()) {
        return Err(WebError::validation(
            "Username must be between 3 and 20 characters",
        ));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(WebError::validation(
            "Username can only contain letters and numbers",
        ));
    }
    if !is_valid_email(form.email.trim()) {
        return Err(WebError::validation("Please enter a valid email address"));
    }
    if form.password.chars().count() < REGISTER_PASSWORD_MIN {
        return Err(WebError::validation(format!(
            "Password must be at least {REGISTER_PASSWORD_MIN} characters long"
        )));
    }
    if form.password != form.confirm_password {
        return Err(WebError::validation("Passwords do not match"));
    }
    if form.server.trim().is_empty() {
        return Err(WebError::validation("Please select a server"));
    }
    if !form.accept_terms {
        return Err(WebError::validation(
            "You must agree to the Terms of Service",
        ));
    }
    Ok(())
}

/// Check a support ticket.
pub fn validate_ticket(ticket: &SupportTicket) -> WebResult<()> {
    if ticket.name.trim().is_empty() {
        return Err(WebError::validation("Please enter your name"));
    }
    if !is_valid_email(ticket.email.trim()) {
        return Err(WebError::validation("Please enter a valid email address"));
    }
    if ticket.subject.trim().is_empty() {
        return Err(WebError::validation("Please enter a subject"));
    }
    if ticket.message.trim().is_empty() {
        return Err(WebError::validation("Please describe your issue"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegistrationForm {
        RegistrationForm {
            username: "NewHero".to_string(),
            email: "hero@example.com".to_string(),
            password: "longenough".to_string(),
            confirm_password: "longenough".to_string(),
            server: "Celestial".to_string(),
            accept_terms: true,
        }
    }

    fn message(result: WebResult<()>) -> String {
        match result {
            Err(WebError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("dragon@example.com"));
        assert!(is_valid_email("a.b@mail.example.org"));
        assert!(!is_valid_email("dragon"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("dragon@example"));
        assert!(!is_valid_email("dragon@.com"));
        assert!(!is_valid_email("dragon@example."));
        assert!(!is_valid_email("dra gon@example.com"));
        assert!(!is_valid_email("a@b@example.com"));
    }

    #[test]
    fn login_rules() {
        assert!(validate_login("DragonSlayer", "password123").is_ok());
        assert!(validate_login("dragon@example.com", "password123").is_ok());
        assert_eq!(
            message(validate_login("  ", "password123")),
            "Please enter your email or username"
        );
        assert_eq!(
            message(validate_login("dragon@", "password123")),
            "Please enter a valid email address"
        );
        assert_eq!(
            message(validate_login("DragonSlayer", "12345")),
            "Password must be at least 6 characters long"
        );
    }

    #[test]
    fn valid_registration_passes() {
        assert!(validate_registration(&form()).is_ok());
    }

    #[test]
    fn registration_rules_in_order() {
        let mut f = form();
        f.username = "ab".to_string();
        f.email = "broken".to_string();
        assert_eq!(
            message(validate_registration(&f)),
            "Username must be between 3 and 20 characters"
        );

        let mut f = form();
        f.username = "x".repeat(21);
        assert_eq!(
            message(validate_registration(&f)),
            "Username must be between 3 and 20 characters"
        );

        let mut f = form();
        f.username = "new_hero".to_string();
        f.email = "broken".to_string();
        assert_eq!(
            message(validate_registration(&f)),
            "Username can only contain letters and numbers"
        );

        let mut f = form();
        f.email = "broken".to_string();
        f.password = "short".to_string();
        assert_eq!(
            message(validate_registration(&f)),
            "Please enter a valid email address"
        );

        let mut f = form();
        f.password = "short".to_string();
        f.confirm_password = "other".to_string();
        assert_eq!(
            message(validate_registration(&f)),
            "Password must be at least 8 characters long"
        );

        let mut f = form();
        f.confirm_password = "different1".to_string();
        f.server.clear();
        assert_eq!(message(validate_registration(&f)), "Passwords do not match");

        let mut f = form();
        f.server.clear();
        f.accept_terms = false;
        assert_eq!(message(validate_registration(&f)), "Please select a server");

        let mut f = form();
        f.accept_terms = false;
        assert_eq!(
            message(validate_registration(&f)),
            "You must agree to the Terms of Service"
        );
    }

    #[test]
    fn ticket_rules() {
        let ticket = SupportTicket {
            name: "Sokha".to_string(),
            email: "sokha@example.com".to_string(),
            subject: "Lost item".to_string(),
            message: "My sword vanished after logout.".to_string(),
        };
        assert!(validate_ticket(&ticket).is_ok());

        let mut t = ticket.clone();
        t.email = "nope".to_string();
        assert_eq!(
            message(validate_ticket(&t)),
            "Please enter a valid email address"
        );

        let mut t = ticket;
        t.message = "   ".to_string();
        assert_eq!(message(validate_ticket(&t)), "Please describe your issue");
    }
}
