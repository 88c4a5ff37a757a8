/// Result of checking a submitted password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Nothing was entered yet.
    NotSubmitted,
    Rejected,
    Granted,
}

impl GateOutcome {
    pub fn is_granted(self) -> bool {
        matches!(self, GateOutcome::Granted)
    }
}

/// Single shared secret in front of the whole dashboard.
#[derive(Clone)]
pub struct PasswordGate {
    secret: String,
}

impl PasswordGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn check(&self, input: &str) -> GateOutcome {
        if input.is_empty() {
            GateOutcome::NotSubmitted
        } else if input != self.secret {
            GateOutcome::Rejected
        } else {
            GateOutcome::Granted
        }
    }
}

impl std::fmt::Debug for PasswordGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordGate")
            .field("secret", &"<redacted>")
            .finish()
    }
}
