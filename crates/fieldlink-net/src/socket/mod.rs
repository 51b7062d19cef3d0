//! Logical sockets hiding TCP vs UDP and unicast vs broadcast.
//!
//! A [`LinkSocket`] may own up to two halves: a server (receive) half bound
//! to a local port, and a client (send) half addressed at a configured or
//! broadcast peer. Initialization runs on a background task so a slow name
//! resolution for one peer never stalls the caller or another socket.
//!
//! # Example
//!
//! ```ignore
//! use fieldlink_net::{LinkSocket, SocketConfig};
//!
//! // Robot channel: UDP, receive on 1150, send to 1110.
//! let robot = LinkSocket::new(SocketConfig::udp("10.0.0.2", 1150, 1110));
//! robot.open();
//!
//! // Radio discovery: UDP broadcast.
//! let radio = LinkSocket::new(SocketConfig::udp("", 0, 1130).broadcast(true));
//! radio.open();
//!
//! // ... poll readiness each cycle ...
//! if robot.client_ready() {
//!     robot.send(&packet).await?;
//! }
//! ```

mod config;
mod factory;
mod link;
mod state;

pub use config::{ANY_ADDRESS, SocketConfig, Transport};
pub use link::LinkSocket;
pub use state::{Role, RoleState};
