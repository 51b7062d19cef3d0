//! Error types for the socket core.

use crate::socket::Role;

/// Result type alias for socket operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during socket lifecycle and transfer operations.
///
/// Lifecycle failures (`Resolve`, `Create`, `Bind`, `Listen`, `Connect`) are
/// confined to one role of one socket: they leave that role's readiness flag
/// false and never affect the sibling role or other sockets. The fail-fast
/// variants (`Disabled`, `NotReady`, `EmptyBuffer`) are returned before any
/// I/O is attempted and are expected steady-state conditions, not faults.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The socket is configured as disabled; no role is ever opened.
    #[error("socket is disabled")]
    Disabled,

    /// The role required for the operation has not finished initializing.
    #[error("{0} role is not ready")]
    NotReady(Role),

    /// A zero-length buffer was passed to a transfer operation.
    #[error("empty transfer buffer")]
    EmptyBuffer,

    /// Hostname resolution failed.
    #[error("cannot resolve '{host}': {message}")]
    Resolve {
        /// The hostname that failed to resolve.
        host: String,
        /// Description of the underlying lookup failure.
        message: String,
    },

    /// Creating a descriptor or applying a socket option failed.
    #[error("cannot create {role} descriptor: {source}")]
    Create {
        /// The role whose descriptor could not be created.
        role: Role,
        #[source]
        source: std::io::Error,
    },

    /// Binding the server descriptor to its local address failed.
    #[error("cannot bind {role} descriptor: {source}")]
    Bind {
        /// The role whose descriptor could not be bound.
        role: Role,
        #[source]
        source: std::io::Error,
    },

    /// Placing a stream server descriptor in listening state failed.
    #[error("cannot listen on server descriptor: {source}")]
    Listen {
        #[source]
        source: std::io::Error,
    },

    /// Connecting a stream client descriptor to its peer failed.
    #[error("cannot connect client descriptor: {source}")]
    Connect {
        #[source]
        source: std::io::Error,
    },

    /// I/O failure during a send or receive on an already-ready socket.
    #[error("transfer failed: {0}")]
    Transfer(#[from] std::io::Error),
}
