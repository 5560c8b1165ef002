//! Authentication state as seen by the bridge.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Page attribute carrying the signed-in user's email.
pub const USER_EMAIL: &str = "user-email";

/// Answers "is the viewer signed in?".
///
/// The bridge asks once per intercepted request and never caches the
/// answer, so implementations should read live state.
pub trait AuthCheck {
    fn is_authenticated(&self) -> bool;
}

impl<F> AuthCheck for F
where
    F: Fn() -> bool,
{
    fn is_authenticated(&self) -> bool {
        self()
    }
}

/// Page attributes describing the current viewer.
///
/// The server renders the signed-in user's email onto the page body; an
/// anonymous page carries none or an empty one.
#[derive(Debug, Clone, Default)]
pub struct Session {
    variables: HashMap<String, String>,
}

impl Session {
    /// Create an anonymous session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session from a map of page attributes.
    pub fn from_map(variables: HashMap<String, String>) -> Self {
        Self { variables }
    }

    /// Get the signed-in user's email, if any.
    pub fn user_email(&self) -> Option<&str> {
        self.get(USER_EMAIL).filter(|email| !email.is_empty())
    }

    /// Get an attribute by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|v| v.as_str())
    }

    /// Set an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }
}

impl AuthCheck for Session {
    fn is_authenticated(&self) -> bool {
        self.user_email().is_some()
    }
}

/// Shared, switchable sign-in flag. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct AuthFlag(Arc<AtomicBool>);

impl AuthFlag {
    pub fn new(authenticated: bool) -> Self {
        Self(Arc::new(AtomicBool::new(authenticated)))
    }

    pub fn set(&self, authenticated: bool) {
        self.0.store(authenticated, Ordering::SeqCst);
    }
}

impl AuthCheck for AuthFlag {
    fn is_authenticated(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
