//! Socket lifecycle and transport core for the Fieldlink driver station
//! library.
//!
//! A driver station keeps live network channels to three independent peers:
//! a field-management system, a radio/bridge, and a robot controller, each
//! potentially on a different transport. This crate provides the uniform
//! socket abstraction those protocol layers build on:
//!
//! - **[`socket`]**: logical sockets with a server (receive) half and a
//!   client (send) half, asynchronous initialization, and per-role
//!   readiness flags
//! - **[`resolver`]**: endpoint resolution with an IP-literal fast path and
//!   a broadcast fallback for unresolvable peers
//! - **[`registry`]**: process-wide tracking so teardown closes every
//!   socket exactly once in effect
//! - **[`protocol`]**: the capability trait concrete peer protocols
//!   implement
//!
//! The core moves opaque byte buffers only; packet encoding, watchdog
//! scheduling, and presentation belong to higher layers. There is no retry
//! or backoff here either; an external timer reopens sockets by calling
//! [`LinkSocket::open`] or [`LinkSocket::change_address`] again.
//!
//! # Example
//!
//! ```ignore
//! use fieldlink_net::{registry, LinkSocket, SocketConfig};
//!
//! registry::init();
//!
//! let robot = LinkSocket::new(SocketConfig::udp("10.0.0.2", 1150, 1110));
//! robot.open(); // returns immediately; init runs in the background
//!
//! // ... each control cycle ...
//! if robot.client_ready() {
//!     robot.send(&packet).await?;
//! }
//!
//! registry::shutdown();
//! ```

mod error;
pub mod protocol;
pub mod registry;
pub mod resolver;
pub mod socket;

pub use error::{Error, Result};

// Re-export commonly used types at the crate root
pub use protocol::Protocol;
pub use resolver::EndpointResolver;
pub use socket::{ANY_ADDRESS, LinkSocket, Role, RoleState, SocketConfig, Transport};
