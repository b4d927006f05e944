//! In-memory credential session.
//!
//! The registry client authenticates with a token/passphrase pair held here.
//! Values live only in memory, are cleared on logout, and never appear in
//! `Debug` output.

use crate::api::SessionStatus;
use crate::errors::CordonError;
use std::sync::Mutex;

#[derive(Default)]
pub struct Session {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    id: Option<String>,
    token: String,
    passphrase: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the identity and credentials for this session. All three values
    /// must be non-empty.
    pub fn set(&self, id: &str, passphrase: &str, token: &str) -> Result<(), CordonError> {
        if id.is_empty() {
            return Err(CordonError::BadRequest("ID must not be empty".to_string()));
        }
        if passphrase.is_empty() {
            return Err(CordonError::BadRequest(
                "Passphrase must not be empty".to_string(),
            ));
        }
        if token.is_empty() {
            return Err(CordonError::BadRequest(
                "Token must not be empty".to_string(),
            ));
        }

        let mut inner = self.inner.lock().expect("session lock poisoned");
        inner.id = Some(id.to_string());
        inner.passphrase = passphrase.to_string();
        inner.token = token.to_string();
        Ok(())
    }

    pub fn id(&self) -> Option<String> {
        self.inner.lock().expect("session lock poisoned").id.clone()
    }

    pub fn token(&self) -> String {
        self.inner
            .lock()
            .expect("session lock poisoned")
            .token
            .clone()
    }

    pub fn passphrase(&self) -> String {
        self.inner
            .lock()
            .expect("session lock poisoned")
            .passphrase
            .clone()
    }

    pub fn has_token(&self) -> bool {
        !self.inner.lock().expect("session lock poisoned").token.is_empty()
    }

    pub fn has_passphrase(&self) -> bool {
        !self
            .inner
            .lock()
            .expect("session lock poisoned")
            .passphrase
            .is_empty()
    }

    pub fn status(&self) -> SessionStatus {
        let inner = self.inner.lock().expect("session lock poisoned");
        SessionStatus {
            token: !inner.token.is_empty(),
            passphrase: !inner.passphrase.is_empty(),
        }
    }

    /// Clear the sensitive values. The identity is kept so a re-login can be
    /// correlated with the previous session.
    pub fn logout(&self) {
        let mut inner = self.inner.lock().expect("session lock poisoned");
        inner.token.clear();
        inner.passphrase.clear();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Session{{token:{},passphrase:{}}}",
            self.has_token(),
            self.has_passphrase()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_status() {
        let session = Session::new();
        assert!(!session.has_token());
        assert!(!session.has_passphrase());

        session.set("user-1", "hunter2", "tok-abc").unwrap();
        assert_eq!(session.id().as_deref(), Some("user-1"));
        assert_eq!(session.token(), "tok-abc");
        assert_eq!(session.passphrase(), "hunter2");

        let status = session.status();
        assert!(status.token);
        assert!(status.passphrase);
    }

    #[test]
    fn test_set_rejects_empty_values() {
        let session = Session::new();
        assert!(session.set("", "hunter2", "tok").is_err());
        assert!(session.set("user-1", "", "tok").is_err());
        assert!(session.set("user-1", "hunter2", "").is_err());
        assert!(!session.has_token());
    }

    #[test]
    fn test_logout_clears_credentials_but_keeps_id() {
        let session = Session::new();
        session.set("user-1", "hunter2", "tok-abc").unwrap();

        session.logout();
        assert!(!session.has_token());
        assert!(!session.has_passphrase());
        assert_eq!(session.id().as_deref(), Some("user-1"));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let session = Session::new();
        session.set("user-1", "hunter2", "tok-abc").unwrap();

        let debug = format!("{session:?}");
        assert_eq!(debug, "Session{token:true,passphrase:true}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("tok-abc"));
    }
}
