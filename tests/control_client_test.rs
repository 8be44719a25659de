//! Control channel client integration tests
//!
//! A scripted TCP server stands in for the daemon: each accepted
//! connection reads command lines and answers from a canned table,
//! CRLF line endings and all.

use std::net::Ipv4Addr;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
#[cfg(unix)]
use tokio::net::UnixListener;

use vigil::control::{ControlAddr, ControlPort, Controller};

// ============================================================================
// HELPERS
// ============================================================================

/// Serve canned replies on an ephemeral port for one connection.
async fn spawn_daemon(script: Vec<(&'static str, &'static str)>) -> ControlAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let (read_half, mut write_half) = stream.into_split();
        let mut reader = BufReader::new(read_half);
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line).await.unwrap_or(0) == 0 {
                break;
            }
            let command = line.trim_end();
            if command == "QUIT" {
                let _ = write_half.write_all(b"250 closing connection\r\n").await;
                break;
            }
            let reply = script
                .iter()
                .find(|(cmd, _)| *cmd == command)
                .map(|(_, reply)| *reply)
                .unwrap_or("510 Unrecognized command\r\n");
            write_half.write_all(reply.as_bytes()).await.unwrap();
        }
    });

    ControlAddr::new(Ipv4Addr::LOCALHOST, port)
}

// ============================================================================
// REPLY SHAPES
// ============================================================================

#[tokio::test]
async fn test_info_single_line() {
    let addr = spawn_daemon(vec![(
        "GETINFO version",
        "250-version=0.4.8.9\r\n250 OK\r\n",
    )])
    .await;

    let mut controller = Controller::connect(addr).await.unwrap();
    assert_eq!(controller.info("version").await.unwrap(), "0.4.8.9");
}

#[tokio::test]
async fn test_info_data_block() {
    let addr = spawn_daemon(vec![(
        "GETINFO config/names",
        "250+config/names=\r\nUseEntryGuards Boolean\r\nMaxMemInQueues DataSize\r\n.\r\n250 OK\r\n",
    )])
    .await;

    let mut controller = Controller::connect(addr).await.unwrap();
    let listing = controller.info("config/names").await.unwrap();
    assert_eq!(listing, "UseEntryGuards Boolean\nMaxMemInQueues DataSize");
}

#[tokio::test]
async fn test_data_block_unescapes_leading_dots() {
    let addr = spawn_daemon(vec![(
        "GETINFO test/dots",
        "250+test/dots=\r\n..hidden\r\nplain\r\n.\r\n250 OK\r\n",
    )])
    .await;

    let mut controller = Controller::connect(addr).await.unwrap();
    assert_eq!(
        controller.info("test/dots").await.unwrap(),
        ".hidden\nplain"
    );
}

#[tokio::test]
async fn test_option_values_collects_every_line() {
    let addr = spawn_daemon(vec![(
        "GETCONF ORPort",
        "250-ORPort=443\r\n250 ORPort=9001\r\n",
    )])
    .await;

    let mut controller = Controller::connect(addr).await.unwrap();
    let values = controller.option_values("ORPort").await.unwrap();
    assert_eq!(values, vec!["443".to_string(), "9001".to_string()]);
}

#[tokio::test]
async fn test_unset_option_yields_no_values() {
    // a bare name with no '=' means the option is unset
    let addr = spawn_daemon(vec![("GETCONF ContactInfo", "250 ContactInfo\r\n")]).await;

    let mut controller = Controller::connect(addr).await.unwrap();
    let values = controller.option_values("ContactInfo").await.unwrap();
    assert!(values.is_empty());
}

#[tokio::test]
async fn test_option_map_over_reply_lines() {
    let addr = spawn_daemon(vec![(
        "GETCONF HiddenServiceOptions",
        "250-HiddenServiceDir=/var/lib/hs\r\n250 HiddenServicePort=80\r\n",
    )])
    .await;

    let mut controller = Controller::connect(addr).await.unwrap();
    let map = controller.option_map("HiddenServiceOptions").await.unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("HiddenServiceDir").map(String::as_str), Some("/var/lib/hs"));
    assert_eq!(map.get("HiddenServicePort").map(String::as_str), Some("80"));
}

#[tokio::test]
async fn test_sequential_requests_reuse_connection() {
    let addr = spawn_daemon(vec![
        ("GETINFO version", "250-version=0.4.8.9\r\n250 OK\r\n"),
        ("GETCONF ORPort", "250 ORPort=443\r\n"),
    ])
    .await;

    let mut controller = Controller::connect(addr).await.unwrap();
    assert_eq!(controller.info("version").await.unwrap(), "0.4.8.9");
    assert_eq!(
        controller.option_values("ORPort").await.unwrap(),
        vec!["443".to_string()]
    );
}

#[tokio::test]
async fn test_request_reports_final_status() {
    let addr = spawn_daemon(vec![(
        "GETINFO version",
        "250-version=0.4.8.9\r\n250 OK\r\n",
    )])
    .await;

    let mut controller = Controller::connect(addr).await.unwrap();
    let reply = controller.request("GETINFO version").await.unwrap();
    assert_eq!(reply.status(), Some(250));
}

// ============================================================================
// UNIX SOCKET TRANSPORT
// ============================================================================

#[cfg(unix)]
#[tokio::test]
async fn test_info_over_control_socket() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("control.sock");
    let listener = UnixListener::bind(&path).unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let (read_half, mut write_half) = stream.into_split();
        let mut reader = BufReader::new(read_half);
        let mut line = String::new();
        reader.read_line(&mut line).await.unwrap();
        assert_eq!(line.trim_end(), "GETINFO version");
        write_half
            .write_all(b"250-version=0.4.8.9\r\n250 OK\r\n")
            .await
            .unwrap();
    });

    let mut controller = Controller::connect_socket(&path).await.unwrap();
    assert_eq!(controller.info("version").await.unwrap(), "0.4.8.9");
}

#[cfg(unix)]
#[tokio::test]
async fn test_missing_socket_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.sock");

    let err = Controller::connect_socket(&path).await.unwrap_err();
    assert_eq!(err.code(), "VIGIL-001");
    assert!(err.to_string().contains("missing.sock"));
}

// ============================================================================
// FAILURE PATHS
// ============================================================================

#[tokio::test]
async fn test_error_reply_surfaces_status() {
    let addr = spawn_daemon(vec![(
        "GETINFO bogus",
        "552 Unrecognized key \"bogus\"\r\n",
    )])
    .await;

    let mut controller = Controller::connect(addr).await.unwrap();
    let err = controller.info("bogus").await.unwrap_err();
    assert_eq!(err.code(), "VIGIL-002");
    assert!(err.to_string().contains("552"));
}

#[tokio::test]
async fn test_connection_refused_fails_fast() {
    // bind then drop to find a port with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = ControlAddr::new(Ipv4Addr::LOCALHOST, listener.local_addr().unwrap().port());
    drop(listener);

    let err = Controller::connect(addr).await.unwrap_err();
    assert_eq!(err.code(), "VIGIL-001");
}

#[tokio::test]
async fn test_closed_mid_reply_is_protocol_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = ControlAddr::new(Ipv4Addr::LOCALHOST, listener.local_addr().unwrap().port());
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let (read_half, mut write_half) = stream.into_split();
        let mut reader = BufReader::new(read_half);
        let mut line = String::new();
        let _ = reader.read_line(&mut line).await;
        // mid line promises more, then the stream dies
        let _ = write_half.write_all(b"250-version=0.4.8.9\r\n").await;
    });

    let mut controller = Controller::connect(addr).await.unwrap();
    let err = controller.info("version").await.unwrap_err();
    assert_eq!(err.code(), "VIGIL-003");
}

#[tokio::test]
async fn test_quit_sends_quit_command() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = ControlAddr::new(Ipv4Addr::LOCALHOST, listener.local_addr().unwrap().port());
    let (tx, rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        reader.read_line(&mut line).await.unwrap();
        let _ = tx.send(line.trim_end().to_string());
    });

    let controller = Controller::connect(addr).await.unwrap();
    controller.quit().await;

    let seen = tokio::time::timeout(Duration::from_secs(1), rx)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(seen, "QUIT");
}
