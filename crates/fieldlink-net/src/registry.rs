//! Process-wide socket registry for bulk teardown.
//!
//! Every logical socket that completes an open pass registers itself here.
//! The collection has exactly two consumers: open (insert) and
//! [`shutdown`] (drain and close); nothing else inspects it. Call [`init`]
//! once before the first open and [`shutdown`] once when no socket is
//! needed anymore.

use parking_lot::Mutex;

use crate::socket::LinkSocket;

const LOG_TARGET: &str = "fieldlink_net::registry";

static SOCKETS: Mutex<Vec<LinkSocket>> = Mutex::new(Vec::new());

/// Initialize the sockets module.
///
/// Resets the registry to an empty state. The platform network subsystem
/// needs no explicit bring-up on any supported target, so this carries no
/// failure path.
pub fn init() {
    SOCKETS.lock().clear();
    tracing::debug!(target: LOG_TARGET, "socket registry initialized");
}

/// Track a socket for process-wide teardown.
///
/// Called once per open pass; a socket reopened without an intervening
/// [`shutdown`] appears more than once, which is harmless because close is
/// idempotent.
pub(crate) fn register(socket: LinkSocket) {
    SOCKETS.lock().push(socket);
}

/// Close every tracked socket and release the registry.
pub fn shutdown() {
    let sockets = std::mem::take(&mut *SOCKETS.lock());
    tracing::debug!(target: LOG_TARGET, "closing {} tracked socket(s)", sockets.len());
    for socket in sockets {
        socket.close();
    }
}
