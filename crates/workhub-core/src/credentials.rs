//! Build-time credential directory.
//!
//! Plaintext username -> password pairs for the demo roster. There is no
//! hashing, expiry or token model here; a real deployment would swap this
//! for an identity provider.

use std::collections::HashMap;

const DEMO_CREDENTIALS: [(&str, &str); 7] = [
    ("admin", "admin123"),
    ("dev-lead", "dev123"),
    ("qa-manager", "qa123"),
    ("reviewer", "review123"),
    ("data-analyst", "data123"),
    ("project-manager", "pm123"),
    ("viewer", "view123"),
];

#[derive(Debug, Clone)]
pub struct CredentialDirectory {
    passwords: HashMap<String, String>,
}

impl CredentialDirectory {
    pub fn new<I, U, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (U, P)>,
        U: Into<String>,
        P: Into<String>,
    {
        Self {
            passwords: entries
                .into_iter()
                .map(|(u, p)| (u.into(), p.into()))
                .collect(),
        }
    }

    pub fn demo() -> Self {
        Self::new(DEMO_CREDENTIALS)
    }

    /// Exact, case-sensitive match of both halves.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.passwords
            .get(username)
            .is_some_and(|expected| expected == password)
    }

    /// Usernames in a stable order, for the login hint.
    pub fn usernames(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.passwords.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for CredentialDirectory {
    fn default() -> Self {
        Self::demo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_exact_match_only() {
        let directory = CredentialDirectory::demo();
        assert!(directory.verify("admin", "admin123"));
        assert!(!directory.verify("admin", "Admin123"));
        assert!(!directory.verify("Admin", "admin123"));
        assert!(!directory.verify("viewer", "wrongpass"));
        assert!(!directory.verify("ghost", "admin123"));
    }

    #[test]
    fn test_demo_directory_covers_roster() {
        assert_eq!(CredentialDirectory::demo().usernames().len(), 7);
    }
}
