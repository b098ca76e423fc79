// Credential verification capability used by the session gate

/// Decides whether a username/password pair is valid. Implementations must
/// be pure: no session bookkeeping, no side effects.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Accepts exactly one configured pair
#[derive(Debug, Clone)]
pub struct StaticCredentialVerifier {
    username: String,
    password: String,
}

impl StaticCredentialVerifier {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl CredentialVerifier for StaticCredentialVerifier {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}
