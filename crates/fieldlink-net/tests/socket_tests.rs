//! Tests for socket configuration and fail-fast behavior.

use std::time::Duration;

use fieldlink_net::{Error, LinkSocket, Role, RoleState, SocketConfig, Transport};

#[test]
fn test_config_builder() {
    let config = SocketConfig::udp("10.0.0.2", 1150, 1110)
        .broadcast(true)
        .disabled(false);

    assert_eq!(config.transport, Transport::Datagram);
    assert_eq!(config.remote_address, "10.0.0.2");
    assert_eq!(config.input_port, 1150);
    assert_eq!(config.output_port, 1110);
    assert!(config.broadcast);
    assert!(!config.disabled);
}

#[test]
fn test_tcp_config_builder() {
    let config = SocketConfig::tcp("172.16.0.1", 1750, 1740);

    assert_eq!(config.transport, Transport::Stream);
    assert_eq!(config.remote_address, "172.16.0.1");
    assert_eq!(config.input_port, 1750);
    assert_eq!(config.output_port, 1740);
    assert!(!config.broadcast);
}

#[test]
fn test_default_config() {
    let config = SocketConfig::default();

    assert_eq!(config.transport, Transport::Datagram);
    assert!(config.remote_address.is_empty());
    assert_eq!(config.input_port, 0);
    assert_eq!(config.output_port, 0);
    assert!(!config.disabled);
    assert!(!config.broadcast);
}

#[test]
fn test_state_display() {
    assert_eq!(RoleState::Uninitialized.to_string(), "Uninitialized");
    assert_eq!(RoleState::Resolving.to_string(), "Resolving");
    assert_eq!(RoleState::Ready.to_string(), "Ready");
    assert_eq!(RoleState::Failed.to_string(), "Failed");
    assert_eq!(Role::Server.to_string(), "server");
    assert_eq!(Role::Client.to_string(), "client");
    assert_eq!(Transport::Stream.to_string(), "TCP");
    assert_eq!(Transport::Datagram.to_string(), "UDP");
}

#[test]
fn test_initial_state() {
    let socket = LinkSocket::new(SocketConfig::udp("127.0.0.1", 0, 0));

    assert_eq!(socket.server_state(), RoleState::Uninitialized);
    assert_eq!(socket.client_state(), RoleState::Uninitialized);
    assert!(!socket.server_ready());
    assert!(!socket.client_ready());
    assert!(!socket.initialized());
    assert!(socket.local_addr().is_none());
}

#[tokio::test]
async fn test_send_before_open_fails() {
    let socket = LinkSocket::new(SocketConfig::udp("127.0.0.1", 0, 26000));

    let result = socket.send(b"test data").await;
    assert!(matches!(result, Err(Error::NotReady(Role::Client))));
}

#[tokio::test]
async fn test_recv_before_open_fails() {
    let socket = LinkSocket::new(SocketConfig::udp("127.0.0.1", 26001, 0));

    let mut buf = [0u8; 64];
    let result = socket.recv(&mut buf).await;
    assert!(matches!(result, Err(Error::NotReady(Role::Server))));
}

#[tokio::test]
async fn test_empty_buffer_fails() {
    let socket = LinkSocket::new(SocketConfig::udp("127.0.0.1", 0, 26002));

    let result = socket.send(b"").await;
    assert!(matches!(result, Err(Error::EmptyBuffer)));

    let mut buf = [0u8; 0];
    let result = socket.recv(&mut buf).await;
    assert!(matches!(result, Err(Error::EmptyBuffer)));
}

#[tokio::test]
async fn test_disabled_socket_never_initializes() {
    let socket = LinkSocket::new(SocketConfig::udp("127.0.0.1", 26010, 26011).disabled(true));
    socket.open();

    // Give a would-be init task ample time to run.
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(!socket.initialized());
    assert!(!socket.server_ready());
    assert!(!socket.client_ready());

    let result = socket.send(b"payload").await;
    assert!(matches!(result, Err(Error::Disabled)));

    let mut buf = [0u8; 64];
    let result = socket.recv(&mut buf).await;
    assert!(matches!(result, Err(Error::Disabled)));
}

#[test]
fn test_close_without_open_is_safe() {
    let socket = LinkSocket::new(SocketConfig::udp("127.0.0.1", 26020, 26021));

    socket.close();
    socket.close();

    assert_eq!(socket.server_state(), RoleState::Uninitialized);
    assert_eq!(socket.client_state(), RoleState::Uninitialized);
    assert!(!socket.initialized());
}

#[tokio::test]
async fn test_close_is_idempotent_after_open() {
    let socket = LinkSocket::new(SocketConfig::udp("127.0.0.1", 26030, 26031));
    socket.open();

    for _ in 0..100 {
        if socket.initialized() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(socket.initialized());

    socket.close();
    socket.close();
    socket.close();

    assert!(!socket.initialized());
    assert!(!socket.server_ready());
    assert!(!socket.client_ready());
    assert!(socket.local_addr().is_none());
}

#[tokio::test]
async fn test_close_during_open_is_safe() {
    let socket = LinkSocket::new(SocketConfig::udp("127.0.0.1", 26040, 26041));

    // Close immediately after open, while init is likely still in flight.
    socket.open();
    socket.close();

    tokio::time::sleep(Duration::from_millis(300)).await;

    // The racing init must not install stale endpoints.
    assert!(!socket.initialized());
    assert!(!socket.server_ready());
    assert!(!socket.client_ready());
}

#[tokio::test]
async fn test_reopen_after_close() {
    let socket = LinkSocket::new(SocketConfig::udp("127.0.0.1", 26050, 26051));

    socket.open();
    for _ in 0..100 {
        if socket.initialized() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(socket.initialized());

    socket.close();
    assert!(!socket.initialized());

    socket.open();
    for _ in 0..100 {
        if socket.initialized() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(socket.server_ready());
    assert!(socket.client_ready());
}
