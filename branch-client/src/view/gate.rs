//! Gate screen state
//!
//! UI-only login gate: any non-empty username/password pair opens it.
//! No credential is sent anywhere.

/// Gate input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEvent {
    UsernameChanged(String),
    PasswordChanged(String),
    Submit,
    Logout,
}

/// Transition reported to the application shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateTransition {
    Authenticated { username: String },
    LoggedOut,
}

pub const EMPTY_CREDENTIALS_HINT: &str = "Username and password are required";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateState {
    pub username: String,
    pub password: String,
    /// Hint shown under the form after a rejected submit
    pub hint: Option<String>,
    authenticated: bool,
}

impl GateState {
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Apply one event
    pub fn handle(&mut self, event: GateEvent) -> Option<GateTransition> {
        match event {
            GateEvent::UsernameChanged(value) => {
                self.username = value;
                self.hint = None;
                None
            }
            GateEvent::PasswordChanged(value) => {
                self.password = value;
                self.hint = None;
                None
            }
            GateEvent::Submit if self.authenticated => None,
            GateEvent::Submit => {
                if self.username.is_empty() || self.password.is_empty() {
                    self.hint = Some(EMPTY_CREDENTIALS_HINT.to_string());
                    return None;
                }
                self.authenticated = true;
                self.hint = None;
                let username = self.username.clone();
                self.password.clear();
                Some(GateTransition::Authenticated { username })
            }
            GateEvent::Logout if !self.authenticated => None,
            GateEvent::Logout => {
                *self = Self::default();
                Some(GateTransition::LoggedOut)
            }
        }
    }
}
