use serde::{Deserialize, Serialize};

/// Established user identity. The auth provider owns credential
/// verification and session issuance; by the time one of these
/// exists the session is already established.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// Stable, normalized user email.
    pub email: String,
}

impl Identity {
    /// Builds a normalized identity, `None` for a blank email.
    pub fn new(email: &str) -> Option<Identity> {
        let email = email.trim().to_lowercase();

        if email.is_empty() {
            return None;
        }

        Some(Identity { email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_trimmed_and_lowercased() {
        let identity = Identity::new("  A@B.Com ").unwrap();
        assert_eq!(identity.email, "a@b.com");
    }

    #[test]
    fn test_blank_email_is_rejected() {
        assert!(Identity::new("").is_none());
        assert!(Identity::new("   ").is_none());
    }
}
