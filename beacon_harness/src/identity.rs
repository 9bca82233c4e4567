use std::fmt::{Debug, Formatter};

/// Credential source threaded into the client configuration. The harness
/// never interprets it beyond logging its kind; the client library owns the
/// actual token encoding and any cryptography it requires.
#[derive(Clone, Default)]
pub enum IdentityProvider {
    #[default]
    Anonymous,
    UserName { username: String, password: String },
}

impl IdentityProvider {
    pub fn username<T: Into<String>, P: Into<String>>(username: T, password: P) -> Self {
        Self::UserName {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The token kind, safe for logs
    pub fn token_kind(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::UserName { .. } => "username",
        }
    }
}

impl Debug for IdentityProvider {
    // passwords stay out of every Debug/log surface
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "Anonymous"),
            Self::UserName { username, .. } => {
                write!(f, "UserName {{ username: {username:?}, password: <hidden> }}")
            }
        }
    }
}
