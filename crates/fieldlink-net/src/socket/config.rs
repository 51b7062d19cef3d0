//! Configuration types for logical sockets.

/// Address substituted when no remote peer is configured or when broadcast
/// mode is requested.
pub const ANY_ADDRESS: &str = "0.0.0.0";

/// Transport used by a logical socket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Transport {
    /// Connection-oriented TCP stream.
    Stream,
    /// Connectionless UDP datagrams.
    #[default]
    Datagram,
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transport::Stream => write!(f, "TCP"),
            Transport::Datagram => write!(f, "UDP"),
        }
    }
}

/// Configuration for a logical socket.
///
/// All fields are set before the socket is first opened; afterwards the only
/// supported mutation is [`LinkSocket::change_address`], which closes and
/// reopens the socket with the new remote address.
///
/// [`LinkSocket::change_address`]: crate::socket::LinkSocket::change_address
#[derive(Clone, Debug)]
pub struct SocketConfig {
    /// Transport used by both roles of the socket.
    pub transport: Transport,
    /// Remote peer address. Empty means "broadcast/any" ([`ANY_ADDRESS`]).
    pub remote_address: String,
    /// Local port the server half binds to.
    pub input_port: u16,
    /// Remote port the client half sends to.
    pub output_port: u16,
    /// When true, no role is ever opened and every transfer fails fast.
    pub disabled: bool,
    /// Request the broadcast socket option and force the remote address to
    /// the broadcast sentinel. Only meaningful for [`Transport::Datagram`].
    pub broadcast: bool,
}

impl Default for SocketConfig {
    fn default() -> Self {
        Self {
            transport: Transport::Datagram,
            remote_address: String::new(),
            input_port: 0,
            output_port: 0,
            disabled: false,
            broadcast: false,
        }
    }
}

impl SocketConfig {
    /// Create a stream (TCP) configuration.
    pub fn tcp(remote_address: impl Into<String>, input_port: u16, output_port: u16) -> Self {
        Self {
            transport: Transport::Stream,
            remote_address: remote_address.into(),
            input_port,
            output_port,
            ..Default::default()
        }
    }

    /// Create a datagram (UDP) configuration.
    pub fn udp(remote_address: impl Into<String>, input_port: u16, output_port: u16) -> Self {
        Self {
            transport: Transport::Datagram,
            remote_address: remote_address.into(),
            input_port,
            output_port,
            ..Default::default()
        }
    }

    /// Set the remote peer address.
    pub fn remote_address(mut self, address: impl Into<String>) -> Self {
        self.remote_address = address.into();
        self
    }

    /// Set the local port the server half binds to.
    pub fn input_port(mut self, port: u16) -> Self {
        self.input_port = port;
        self
    }

    /// Set the remote port the client half sends to.
    pub fn output_port(mut self, port: u16) -> Self {
        self.output_port = port;
        self
    }

    /// Enable or disable broadcast mode.
    pub fn broadcast(mut self, enabled: bool) -> Self {
        self.broadcast = enabled;
        self
    }

    /// Enable or disable the whole socket.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}
