//! Tests for endpoint resolution.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use fieldlink_net::{EndpointResolver, SocketConfig};

#[test]
fn test_server_addr_is_wildcard() {
    let resolver = EndpointResolver::new();
    let config = SocketConfig::udp("10.0.0.2", 1150, 1110);

    let addr = resolver.server_addr(&config);
    assert_eq!(
        addr,
        SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 1150)
    );
}

#[tokio::test]
async fn test_client_addr_ip_literal() {
    let resolver = EndpointResolver::new();
    let config = SocketConfig::udp("10.0.0.2", 0, 1110);

    let addr = resolver.client_addr(&config).await;
    assert_eq!(addr, "10.0.0.2:1110".parse().unwrap());
}

#[tokio::test]
async fn test_client_addr_empty_remote_is_sentinel() {
    let resolver = EndpointResolver::new();
    let config = SocketConfig::udp("", 0, 1130);

    let addr = resolver.client_addr(&config).await;
    assert_eq!(
        addr,
        SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 1130)
    );
}

#[tokio::test]
async fn test_client_addr_broadcast_overrides_remote() {
    let resolver = EndpointResolver::new();
    let config = SocketConfig::udp("10.0.0.2", 0, 1130).broadcast(true);

    let addr = resolver.client_addr(&config).await;
    assert_eq!(
        addr,
        SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 1130)
    );
}

#[tokio::test]
async fn test_resolve_host_v4_literal() {
    let resolver = EndpointResolver::new();

    let ip = resolver.resolve_host("192.168.1.42").await.unwrap();
    assert_eq!(ip, IpAddr::V4(Ipv4Addr::new(192, 168, 1, 42)));
}

#[tokio::test]
async fn test_resolve_host_v6_literal() {
    let resolver = EndpointResolver::new();

    let ip = resolver.resolve_host("::1").await.unwrap();
    assert_eq!(ip, IpAddr::V6(Ipv6Addr::LOCALHOST));
}
