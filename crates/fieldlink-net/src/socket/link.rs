//! Logical socket lifecycle management and transfer operations.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};

use super::config::{SocketConfig, Transport};
use super::factory;
use super::state::{Role, RoleState};
use crate::error::{Error, Result};
use crate::registry;
use crate::resolver::EndpointResolver;

const LOG_TARGET: &str = "fieldlink_net::socket";

/// Backlog for stream server descriptors.
const LISTEN_BACKLOG: u32 = 5;

/// Receive half of a logical socket.
#[derive(Clone)]
enum ServerEndpoint {
    Datagram(Arc<UdpSocket>),
    Stream {
        listener: Arc<TcpListener>,
        /// Connection accepted from the remote peer, if any.
        peer: Option<Arc<tokio::sync::Mutex<TcpStream>>>,
    },
}

/// Send half of a logical socket.
#[derive(Clone)]
enum ClientEndpoint {
    Datagram {
        socket: Arc<UdpSocket>,
        target: SocketAddr,
    },
    Stream(Arc<tokio::sync::Mutex<TcpStream>>),
}

/// Runtime state owned exclusively by the logical socket.
struct Runtime {
    /// Bumped by every close. An initialization task captures the epoch it
    /// started under and discards its results if a close happened since, so
    /// a close can never race a still-running init into leaking or
    /// double-closing descriptors.
    epoch: u64,
    server_state: RoleState,
    client_state: RoleState,
    server: Option<ServerEndpoint>,
    client: Option<ClientEndpoint>,
}

struct Shared {
    config: Mutex<SocketConfig>,
    runtime: Mutex<Runtime>,
    resolver: EndpointResolver,
}

/// A logical socket that may own a server (receive) half and a client
/// (send) half, hiding TCP vs UDP and unicast vs broadcast behind one type.
///
/// [`open`](Self::open) schedules initialization on a background task and
/// returns immediately; callers poll the readiness flags
/// ([`initialized`](Self::initialized), [`server_ready`](Self::server_ready),
/// [`client_ready`](Self::client_ready)) to decide whether to attempt a
/// transfer this cycle. Partial success is valid and expected: a UDP socket
/// used only for telemetry upload typically stands up just its client half.
///
/// Cloning is cheap and produces another handle to the same socket.
///
/// # Example
///
/// ```ignore
/// use fieldlink_net::{LinkSocket, SocketConfig};
///
/// let socket = LinkSocket::new(SocketConfig::udp("10.0.0.2", 1150, 1110));
/// socket.open();
///
/// // ... once socket.client_ready() ...
/// let sent = socket.send(&packet).await?;
/// ```
#[derive(Clone)]
pub struct LinkSocket {
    shared: Arc<Shared>,
}

impl LinkSocket {
    /// Create a logical socket from a configuration.
    ///
    /// No descriptors are created until [`open`](Self::open) is called.
    pub fn new(config: SocketConfig) -> Self {
        Self::with_resolver(config, EndpointResolver::new())
    }

    /// Create a logical socket sharing an existing resolver.
    pub fn with_resolver(config: SocketConfig, resolver: EndpointResolver) -> Self {
        Self {
            shared: Arc::new(Shared {
                config: Mutex::new(config),
                runtime: Mutex::new(Runtime {
                    epoch: 0,
                    server_state: RoleState::Uninitialized,
                    client_state: RoleState::Uninitialized,
                    server: None,
                    client: None,
                }),
                resolver,
            }),
        }
    }

    /// Get a copy of the current configuration.
    pub fn config(&self) -> SocketConfig {
        self.shared.config.lock().clone()
    }

    /// Get the configured remote address.
    pub fn remote_address(&self) -> String {
        self.shared.config.lock().remote_address.clone()
    }

    /// Get the transport this socket uses.
    pub fn transport(&self) -> Transport {
        self.shared.config.lock().transport
    }

    /// Get the current state of the server half.
    pub fn server_state(&self) -> RoleState {
        self.shared.runtime.lock().server_state
    }

    /// Get the current state of the client half.
    pub fn client_state(&self) -> RoleState {
        self.shared.runtime.lock().client_state
    }

    /// Whether the server half is usable for receiving.
    pub fn server_ready(&self) -> bool {
        self.server_state().is_ready()
    }

    /// Whether the client half is usable for sending.
    pub fn client_ready(&self) -> bool {
        self.client_state().is_ready()
    }

    /// Whether at least one half finished initialization successfully.
    pub fn initialized(&self) -> bool {
        let runtime = self.shared.runtime.lock();
        runtime.server_state.is_ready() || runtime.client_state.is_ready()
    }

    /// Actual local address of the server half, once bound.
    ///
    /// Useful when the input port was configured as 0 and the OS picked an
    /// ephemeral port.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        let runtime = self.shared.runtime.lock();
        match &runtime.server {
            Some(ServerEndpoint::Datagram(socket)) => socket.local_addr().ok(),
            Some(ServerEndpoint::Stream { listener, .. }) => listener.local_addr().ok(),
            None => None,
        }
    }

    /// Open the socket.
    ///
    /// No-op when the socket is disabled. Otherwise initialization is
    /// scheduled on a background task and this call returns immediately;
    /// opens of independent sockets never serialize on each other. After
    /// both roles have been attempted the socket is registered with the
    /// [registry](crate::registry) for process-wide teardown.
    ///
    /// Must be called from within a tokio runtime context.
    pub fn open(&self) {
        if self.shared.config.lock().disabled {
            return;
        }

        let epoch = self.shared.runtime.lock().epoch;
        let socket = self.clone();
        tokio::spawn(async move {
            initialize(socket, epoch).await;
        });
    }

    /// Close the socket.
    ///
    /// Idempotent: safe to call on a socket that was never opened, already
    /// closed, or whose initialization is still in flight. Both halves are
    /// dropped and all readiness flags reset.
    pub fn close(&self) {
        let (server, client) = {
            let mut runtime = self.shared.runtime.lock();
            runtime.epoch += 1;
            runtime.server_state = RoleState::Uninitialized;
            runtime.client_state = RoleState::Uninitialized;
            (runtime.server.take(), runtime.client.take())
        };

        // Descriptors close on drop, outside the lock.
        drop(server);
        drop(client);
    }

    /// Change the remote address.
    ///
    /// The sole supported reconfiguration path: closes the socket,
    /// overwrites the remote address, and opens it again. No field is
    /// mutated while the socket is live.
    pub fn change_address(&self, address: impl Into<String>) {
        self.close();
        self.shared.config.lock().remote_address = address.into();
        self.open();
    }

    /// Send a buffer through the client half.
    ///
    /// Fails immediately, without attempting I/O, when the socket is
    /// disabled, the buffer is empty, or the client half is not ready.
    /// Returns the number of bytes accepted by the OS.
    pub async fn send(&self, data: &[u8]) -> Result<usize> {
        if self.shared.config.lock().disabled {
            return Err(Error::Disabled);
        }
        if data.is_empty() {
            return Err(Error::EmptyBuffer);
        }

        let client = {
            let runtime = self.shared.runtime.lock();
            if !runtime.client_state.is_ready() {
                return Err(Error::NotReady(Role::Client));
            }
            runtime.client.clone().ok_or(Error::NotReady(Role::Client))?
        };

        match client {
            ClientEndpoint::Datagram { socket, target } => {
                Ok(socket.send_to(data, target).await?)
            }
            ClientEndpoint::Stream(stream) => Ok(stream.lock().await.write(data).await?),
        }
    }

    /// Receive into a buffer through the server half.
    ///
    /// Fails immediately, without attempting I/O, when the socket is
    /// disabled, the buffer is empty, or the server half is not ready.
    /// Datagram sockets receive one datagram; stream sockets lazily accept
    /// a peer connection and read from it, returning `Ok(0)` when the peer
    /// disconnects (the next call accepts a fresh connection). Blocks until
    /// data arrives; callers wanting a bounded wait wrap this in their own
    /// timeout.
    pub async fn recv(&self, buf: &mut [u8]) -> Result<usize> {
        if self.shared.config.lock().disabled {
            return Err(Error::Disabled);
        }
        if buf.is_empty() {
            return Err(Error::EmptyBuffer);
        }

        let (server, epoch) = {
            let runtime = self.shared.runtime.lock();
            if !runtime.server_state.is_ready() {
                return Err(Error::NotReady(Role::Server));
            }
            let server = runtime.server.clone().ok_or(Error::NotReady(Role::Server))?;
            (server, runtime.epoch)
        };

        match server {
            ServerEndpoint::Datagram(socket) => {
                let (received, _from) = socket.recv_from(buf).await?;
                Ok(received)
            }
            ServerEndpoint::Stream { listener, peer } => {
                let stream = match peer {
                    Some(stream) => stream,
                    None => self.accept_peer(&listener, epoch).await?,
                };

                let received = stream.lock().await.read(buf).await?;
                if received == 0 {
                    // Peer went away; accept a fresh connection next time.
                    let mut runtime = self.shared.runtime.lock();
                    if runtime.epoch == epoch
                        && let Some(ServerEndpoint::Stream { peer, .. }) = &mut runtime.server
                    {
                        *peer = None;
                    }
                }
                Ok(received)
            }
        }
    }

    /// Accept one peer connection on the stream server half and remember it
    /// for subsequent reads.
    async fn accept_peer(
        &self,
        listener: &TcpListener,
        epoch: u64,
    ) -> Result<Arc<tokio::sync::Mutex<TcpStream>>> {
        let (stream, peer_addr) = listener.accept().await?;
        tracing::debug!(target: LOG_TARGET, "accepted stream peer {}", peer_addr);

        let stream = Arc::new(tokio::sync::Mutex::new(stream));
        let mut runtime = self.shared.runtime.lock();
        if runtime.epoch == epoch
            && let Some(ServerEndpoint::Stream { peer, .. }) = &mut runtime.server
        {
            // A concurrent receive may have accepted first; keep its peer and
            // drop this connection instead of replacing the stored one.
            if let Some(existing) = peer {
                return Ok(existing.clone());
            }
            *peer = Some(stream.clone());
        }
        Ok(stream)
    }
}

impl std::fmt::Debug for LinkSocket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let config = self.shared.config.lock();
        let runtime = self.shared.runtime.lock();
        f.debug_struct("LinkSocket")
            .field("transport", &config.transport)
            .field("remote_address", &config.remote_address)
            .field("input_port", &config.input_port)
            .field("output_port", &config.output_port)
            .field("server_state", &runtime.server_state)
            .field("client_state", &runtime.client_state)
            .finish()
    }
}

/// Background initialization for one open call.
///
/// Client and server roles are attempted sequentially; each failure is local
/// to its role. Results are installed only if no close happened since the
/// open that scheduled this task.
async fn initialize(socket: LinkSocket, epoch: u64) {
    let shared = &socket.shared;

    let config = {
        let mut config = shared.config.lock();
        // Broadcast sockets always target the sentinel address.
        if config.broadcast {
            config.remote_address.clear();
        }
        config.clone()
    };

    {
        let mut runtime = shared.runtime.lock();
        if runtime.epoch != epoch {
            return;
        }
        runtime.server_state = RoleState::Resolving;
        runtime.client_state = RoleState::Resolving;
    }

    let client = init_client(&shared.resolver, &config).await;
    let server = init_server(&shared.resolver, &config).await;

    {
        let mut runtime = shared.runtime.lock();
        if runtime.epoch == epoch {
            match client {
                Ok(endpoint) => {
                    runtime.client = Some(endpoint);
                    runtime.client_state = RoleState::Ready;
                }
                Err(e) => {
                    tracing::warn!(
                        target: LOG_TARGET,
                        "client role failed ({} '{}' out {}): {}",
                        config.transport,
                        config.remote_address,
                        config.output_port,
                        e
                    );
                    runtime.client_state = RoleState::Failed;
                }
            }
            match server {
                Ok(endpoint) => {
                    runtime.server = Some(endpoint);
                    runtime.server_state = RoleState::Ready;
                }
                Err(e) => {
                    tracing::warn!(
                        target: LOG_TARGET,
                        "server role failed ({} in {}): {}",
                        config.transport,
                        config.input_port,
                        e
                    );
                    runtime.server_state = RoleState::Failed;
                }
            }
            tracing::debug!(
                target: LOG_TARGET,
                "socket opened ({} '{}' in {} out {}): server {}, client {}",
                config.transport,
                config.remote_address,
                config.input_port,
                config.output_port,
                runtime.server_state,
                runtime.client_state
            );
        }
        // Otherwise a close raced this init; the freshly created endpoints
        // drop here and close their descriptors.
    }

    registry::register(socket);
}

/// Stand up the send half: resolve the remote endpoint, create the
/// descriptor, and connect it for stream transports.
async fn init_client(resolver: &EndpointResolver, config: &SocketConfig) -> Result<ClientEndpoint> {
    let target = resolver.client_addr(config).await;

    match config.transport {
        Transport::Datagram => {
            let socket = factory::datagram(target, config.broadcast, Role::Client)?;
            // An explicit ephemeral bind in the target's family lets the
            // descriptor register with the reactor before the first send.
            let local = SocketAddr::new(unspecified_ip(target), 0);
            socket
                .bind(&local.into())
                .map_err(|source| Error::Bind { role: Role::Client, source })?;
            let socket = UdpSocket::from_std(socket.into())
                .map_err(|source| Error::Create { role: Role::Client, source })?;
            Ok(ClientEndpoint::Datagram {
                socket: Arc::new(socket),
                target,
            })
        }
        Transport::Stream => {
            let socket = factory::stream(target, Role::Client)?;
            let stream = socket
                .connect(target)
                .await
                .map_err(|source| Error::Connect { source })?;
            Ok(ClientEndpoint::Stream(Arc::new(tokio::sync::Mutex::new(
                stream,
            ))))
        }
    }
}

/// Stand up the receive half: bind the wildcard address on the input port,
/// and start listening for stream transports.
async fn init_server(resolver: &EndpointResolver, config: &SocketConfig) -> Result<ServerEndpoint> {
    let addr = resolver.server_addr(config);

    match config.transport {
        Transport::Datagram => {
            let socket = factory::datagram(addr, config.broadcast, Role::Server)?;
            socket
                .bind(&addr.into())
                .map_err(|source| Error::Bind { role: Role::Server, source })?;
            let socket = UdpSocket::from_std(socket.into())
                .map_err(|source| Error::Create { role: Role::Server, source })?;
            Ok(ServerEndpoint::Datagram(Arc::new(socket)))
        }
        Transport::Stream => {
            let socket = factory::stream(addr, Role::Server)?;
            socket
                .bind(addr)
                .map_err(|source| Error::Bind { role: Role::Server, source })?;
            let listener = socket
                .listen(LISTEN_BACKLOG)
                .map_err(|source| Error::Listen { source })?;
            Ok(ServerEndpoint::Stream {
                listener: Arc::new(listener),
                peer: None,
            })
        }
    }
}

fn unspecified_ip(addr: SocketAddr) -> IpAddr {
    if addr.is_ipv4() {
        IpAddr::V4(Ipv4Addr::UNSPECIFIED)
    } else {
        IpAddr::V6(Ipv6Addr::UNSPECIFIED)
    }
}
