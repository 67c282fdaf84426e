//! Runs the real listener on an ephemeral port and talks to it over TCP.

use std::net::IpAddr;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tokio::io::AsyncReadExt as _;
use tokio::io::AsyncWriteExt as _;
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;
use wake_service::application::config::HttpConfig;
use wake_service::http::http_server::HttpServer;
use wake_service::http::wake_observer::TracingWakeObserver;

async fn raw_get(addr: std::net::SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn serves_wake_over_tcp_until_shutdown() {
    let config = HttpConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        legacy_route_enabled: true,
    };
    let http_server = HttpServer::new(config, Arc::new(TracingWakeObserver));
    let listener = http_server.bind().await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = CancellationToken::new();
    let server = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move { http_server.serve(listener, shutdown).await })
    };

    let response = raw_get(addr, "/api/v1/wake").await;
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "{response}");
    assert!(response.to_ascii_lowercase().contains("content-type: application/json"));
    assert!(response.ends_with(r#"{"status":"UP!"}"#), "{response}");

    let response = raw_get(addr, "/wake").await;
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "{response}");

    shutdown.cancel();
    server.await.unwrap().unwrap();

    assert!(TcpStream::connect(addr).await.is_err());
}
