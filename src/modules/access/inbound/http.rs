use axum::http::{HeaderMap, StatusCode};

use crate::modules::access::password_gate::{GateOutcome, PasswordGate};

pub const PASSWORD_HEADER: &str = "x-dashboard-password";

/// Checks the password header of a request. A missing or empty header is
/// `401`, a wrong password `403`.
pub fn authorize(gate: &PasswordGate, headers: &HeaderMap) -> Result<(), StatusCode> {
    let submitted = headers
        .get(PASSWORD_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    match gate.check(submitted) {
        GateOutcome::Granted => Ok(()),
        GateOutcome::NotSubmitted => Err(StatusCode::UNAUTHORIZED),
        GateOutcome::Rejected => {
            tracing::warn!("rejected dashboard password");
            Err(StatusCode::FORBIDDEN)
        }
    }
}
