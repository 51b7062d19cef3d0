//! Endpoint resolution for logical sockets.
//!
//! Turns a socket configuration into concrete addresses for both roles:
//! the server half always binds the wildcard address on the input port, and
//! the client half resolves the configured remote address with a fallback to
//! the broadcast sentinel, so a dead or misspelled hostname degrades to
//! broadcast-capable behavior instead of aborting socket creation.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use hickory_resolver::{Resolver, TokioResolver};

use crate::error::{Error, Result};
use crate::socket::{ANY_ADDRESS, SocketConfig};

const LOG_TARGET: &str = "fieldlink_net::resolver";

/// Resolver shared by the logical sockets of one protocol session.
///
/// IP literals are parsed directly without touching DNS, so sockets
/// addressed at static peers (the common case for robot and radio) never
/// wait on a lookup. Hostnames go through the system DNS configuration,
/// which is what knows the LAN names a driver station actually targets.
#[derive(Clone)]
pub struct EndpointResolver {
    resolver: Option<TokioResolver>,
}

impl EndpointResolver {
    /// Create a resolver from the system DNS configuration
    /// (`/etc/resolv.conf` on Unix, the registry on Windows).
    ///
    /// Never fails: when the system configuration cannot be read, hostname
    /// lookups are disabled and only IP literals resolve. The degradation is
    /// logged once here rather than on every lookup.
    pub fn new() -> Self {
        let resolver = match Resolver::builder_tokio() {
            Ok(builder) => Some(builder.build()),
            Err(e) => {
                tracing::warn!(
                    target: LOG_TARGET,
                    "cannot read system DNS configuration, hostname lookups disabled: {}",
                    e
                );
                None
            }
        };

        Self { resolver }
    }

    /// Local receive endpoint for the server half.
    ///
    /// Always the wildcard address with the configured input port, so the
    /// socket is reachable on every local interface.
    pub fn server_addr(&self, config: &SocketConfig) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), config.input_port)
    }

    /// Remote send endpoint for the client half.
    ///
    /// An empty remote address, or broadcast mode, resolves to the broadcast
    /// sentinel. A configured address that fails to resolve also falls back
    /// to the sentinel rather than failing the role; the degradation is
    /// logged so a typo'd hostname is at least visible.
    pub async fn client_addr(&self, config: &SocketConfig) -> SocketAddr {
        let port = config.output_port;

        if config.broadcast || config.remote_address.is_empty() {
            return SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);
        }

        match self.resolve_host(&config.remote_address).await {
            Ok(ip) => SocketAddr::new(ip, port),
            Err(e) => {
                tracing::warn!(
                    target: LOG_TARGET,
                    "cannot resolve '{}', falling back to {}: {}",
                    config.remote_address,
                    ANY_ADDRESS,
                    e
                );
                SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port)
            }
        }
    }

    /// Resolve a host to a single IP address.
    ///
    /// IP literals (IPv4 or IPv6) short-circuit; anything else goes through
    /// system DNS and returns the first address of the response. Fails for
    /// every non-literal host when the resolver came up without a usable
    /// system configuration.
    pub async fn resolve_host(&self, host: &str) -> Result<IpAddr> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(ip);
        }

        let Some(resolver) = &self.resolver else {
            return Err(Error::Resolve {
                host: host.to_string(),
                message: "hostname lookups are disabled".to_string(),
            });
        };

        let response = resolver
            .lookup_ip(host)
            .await
            .map_err(|e| Error::Resolve {
                host: host.to_string(),
                message: e.to_string(),
            })?;

        response.iter().next().ok_or_else(|| Error::Resolve {
            host: host.to_string(),
            message: "no addresses found".to_string(),
        })
    }
}

impl Default for EndpointResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EndpointResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointResolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dns_disabled() -> EndpointResolver {
        EndpointResolver { resolver: None }
    }

    #[tokio::test]
    async fn literals_resolve_without_dns() {
        let resolver = dns_disabled();

        let ip = resolver.resolve_host("10.12.34.2").await.unwrap();
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::new(10, 12, 34, 2)));

        let ip = resolver.resolve_host("::1").await.unwrap();
        assert!(ip.is_loopback());
    }

    #[tokio::test]
    async fn hostname_fails_without_dns() {
        let resolver = dns_disabled();

        let err = resolver.resolve_host("roborio-1234-frc.local").await;
        assert!(matches!(err, Err(Error::Resolve { .. })));
    }

    #[tokio::test]
    async fn client_addr_falls_back_without_dns() {
        let resolver = dns_disabled();
        let config = SocketConfig::udp("roborio-1234-frc.local", 0, 1110);

        let addr = resolver.client_addr(&config).await;
        assert_eq!(
            addr,
            SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 1110)
        );
    }
}
