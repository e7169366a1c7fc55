use std::time::Duration;

use crate::model::session::{Role, Session};

/// Message shown when a credential pair does not match
pub const INVALID_CREDENTIALS: &str = "Invalid Employee ID or password.";

/// The two accounts the board knows about: (employee ID, password, role)
const CREDENTIALS: [(&str, &str, Role); 2] = [
    ("TL1001", "tl@pass", Role::TeamLead),
    ("EMP2001", "emp@pass", Role::Employee),
];

/// Error type for sign-in
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid Employee ID or password.")]
    InvalidCredentials,
}

/// Where a sign-in attempt stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Idle,
    Pending,
    Authenticated(Session),
    Failed(String),
}

impl AuthState {
    /// Start an attempt. Returns false if one is already pending.
    pub fn submit(&mut self) -> bool {
        if *self == AuthState::Pending {
            return false;
        }
        *self = AuthState::Pending;
        true
    }

    /// Record the outcome of the pending attempt
    pub fn resolve(&mut self, result: Result<Session, AuthError>) {
        *self = match result {
            Ok(session) => AuthState::Authenticated(session),
            Err(e) => AuthState::Failed(e.to_string()),
        };
    }

    pub fn is_pending(&self) -> bool {
        *self == AuthState::Pending
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AuthState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Compare an ID/password pair against the static accounts. No delay.
pub fn check_credentials(employee_id: &str, password: &str) -> Result<Session, AuthError> {
    CREDENTIALS
        .iter()
        .find(|(id, pw, _)| *id == employee_id && *pw == password)
        .map(|(id, _, role)| Session::new(*role, *id))
        .ok_or(AuthError::InvalidCredentials)
}

/// Sign in after waiting `delay`, the way a remote check would feel.
/// Blocks the calling thread; the TUI runs this on a worker.
pub fn authenticate(
    employee_id: &str,
    password: &str,
    delay: Duration,
) -> Result<Session, AuthError> {
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
    let result = check_credentials(employee_id, password);
    match &result {
        Ok(session) => tracing::info!(employee = %session.employee_id, role = %session.role, "signed in"),
        Err(_) => tracing::info!(employee = employee_id, "sign-in rejected"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn team_lead_credentials_yield_elevated_role() {
        let session = check_credentials("TL1001", "tl@pass").unwrap();
        assert_eq!(session, Session::new(Role::TeamLead, "TL1001"));
    }

    #[test]
    fn employee_credentials_yield_base_role() {
        let session = check_credentials("EMP2001", "emp@pass").unwrap();
        assert_eq!(session, Session::new(Role::Employee, "EMP2001"));
    }

    #[test]
    fn mismatched_pairs_fail() {
        assert_eq!(
            check_credentials("TL1001", "emp@pass"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            check_credentials("tl1001", "tl@pass"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(check_credentials("", ""), Err(AuthError::InvalidCredentials));
    }

    #[test]
    fn failure_message_matches_login_screen_text() {
        assert_eq!(AuthError::InvalidCredentials.to_string(), INVALID_CREDENTIALS);
    }

    #[test]
    fn authenticate_waits_for_the_delay() {
        let start = Instant::now();
        let result = authenticate("nobody", "nothing", Duration::from_millis(30));
        assert!(start.elapsed() >= Duration::from_millis(30));
        assert_eq!(result, Err(AuthError::InvalidCredentials));
    }

    #[test]
    fn state_machine_idle_pending_failed_authenticated() {
        let mut state = AuthState::default();
        assert_eq!(state, AuthState::Idle);

        assert!(state.submit());
        assert!(state.is_pending());
        // A second submit while pending is ignored
        assert!(!state.submit());

        state.resolve(Err(AuthError::InvalidCredentials));
        assert_eq!(state.error(), Some(INVALID_CREDENTIALS));

        // Resubmission after failure
        assert!(state.submit());
        state.resolve(check_credentials("EMP2001", "emp@pass"));
        assert!(matches!(state, AuthState::Authenticated(ref s) if s.role == Role::Employee));
        assert_eq!(state.error(), None);
    }
}
