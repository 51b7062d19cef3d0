//! Descriptor creation with transport options applied.
//!
//! The factory only creates and configures descriptors; binding, listening,
//! and connecting stay with the lifecycle manager in [`link`](super::link).

use std::net::SocketAddr;

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpSocket;

use super::state::Role;
use crate::error::{Error, Result};

/// Create a datagram descriptor for the address family of `addr`.
///
/// Address/port reuse is always requested so a reopen immediately after a
/// close does not fail with "address in use"; broadcast permission is
/// requested when the configuration asks for it. A failed option drops the
/// descriptor, which closes it, and fails only this role.
pub(crate) fn datagram(addr: SocketAddr, broadcast: bool, role: Role) -> Result<Socket> {
    let create = |source| Error::Create { role, source };

    let socket =
        Socket::new(Domain::for_address(addr), Type::DGRAM, Some(Protocol::UDP)).map_err(create)?;
    apply_reuse(&socket).map_err(create)?;
    if broadcast {
        socket.set_broadcast(true).map_err(create)?;
    }
    // Registration with the tokio reactor requires a non-blocking descriptor.
    socket.set_nonblocking(true).map_err(create)?;

    Ok(socket)
}

/// Create a stream descriptor with reuse flags for the address family of
/// `addr`. The caller binds + listens (server role) or connects (client
/// role).
pub(crate) fn stream(addr: SocketAddr, role: Role) -> Result<TcpSocket> {
    let create = |source| Error::Create { role, source };

    let socket = match addr {
        SocketAddr::V4(_) => TcpSocket::new_v4(),
        SocketAddr::V6(_) => TcpSocket::new_v6(),
    }
    .map_err(create)?;

    socket.set_reuseaddr(true).map_err(create)?;
    #[cfg(all(unix, not(target_os = "solaris"), not(target_os = "illumos")))]
    socket.set_reuseport(true).map_err(create)?;

    Ok(socket)
}

fn apply_reuse(socket: &Socket) -> std::io::Result<()> {
    socket.set_reuse_address(true)?;
    #[cfg(all(unix, not(target_os = "solaris"), not(target_os = "illumos")))]
    socket.set_reuse_port(true)?;
    Ok(())
}
