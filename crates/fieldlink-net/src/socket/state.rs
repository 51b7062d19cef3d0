//! Role and state enumerations for logical sockets.

/// The two halves a logical socket may own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// The receive half, bound to a local port.
    Server,
    /// The send half, addressed at the configured or broadcast peer.
    Client,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Server => write!(f, "server"),
            Role::Client => write!(f, "client"),
        }
    }
}

/// Initialization state of one role of a logical socket.
///
/// Each role advances independently. `Failed` is reached only through
/// resolution, descriptor, or bind/listen/connect errors; a close forces
/// either state back to `Uninitialized`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RoleState {
    /// No descriptor exists for this role.
    #[default]
    Uninitialized,
    /// Background initialization is resolving and configuring the role.
    Resolving,
    /// The role completed initialization and is safe to use for transfers.
    Ready,
    /// Initialization failed; the role stays unusable until reopened.
    Failed,
}

impl RoleState {
    /// Whether the role is usable for transfer operations.
    pub fn is_ready(self) -> bool {
        self == RoleState::Ready
    }
}

impl std::fmt::Display for RoleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleState::Uninitialized => write!(f, "Uninitialized"),
            RoleState::Resolving => write!(f, "Resolving"),
            RoleState::Ready => write!(f, "Ready"),
            RoleState::Failed => write!(f, "Failed"),
        }
    }
}
