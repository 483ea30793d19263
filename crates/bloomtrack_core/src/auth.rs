//! Login gate for the app shell.
//!
//! Not a security boundary: credentials are a fixed pair from config and
//! nothing is stored.

use crate::config::Credentials;
use log::info;

#[derive(Debug, Clone)]
pub struct LoginGate {
    credentials: Credentials,
}

impl LoginGate {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Exact, case-sensitive match against the configured pair.
    pub fn check(&self, username: &str, password: &str) -> bool {
        let granted =
            username == self.credentials.username && password == self.credentials.password;
        info!(
            "event=login module=auth status={}",
            if granted { "ok" } else { "denied" }
        );
        granted
    }
}

impl Default for LoginGate {
    fn default() -> Self {
        Self::new(Credentials::default())
    }
}

/// Accepts a sign-up form when both fields are filled and the password is
/// confirmed. No account is created.
pub fn validate_sign_up(username: &str, password: &str, confirm_password: &str) -> bool {
    password == confirm_password && !username.trim().is_empty() && !password.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::{validate_sign_up, LoginGate};

    #[test]
    fn only_the_exact_pair_is_accepted() {
        let gate = LoginGate::default();
        assert!(gate.check("test", "test"));
        assert!(!gate.check("Test", "test"));
        assert!(!gate.check("test ", "test"));
        assert!(!gate.check("", ""));
    }

    #[test]
    fn sign_up_requires_matching_non_blank_fields() {
        assert!(validate_sign_up("ada", "lily", "lily"));
        assert!(!validate_sign_up("ada", "lily", "lilY"));
        assert!(!validate_sign_up("  ", "lily", "lily"));
        assert!(!validate_sign_up("ada", " ", " "));
    }
}
