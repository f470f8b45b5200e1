/*!
 * Minimal HTTP/1.1 server for exercising the real HTTP clients offline
 */

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// One canned answer, chosen when the request path starts with `path_prefix`
#[derive(Debug, Clone, Copy)]
pub struct StubRoute {
    pub path_prefix: &'static str,
    pub status_line: &'static str,
    pub body: &'static str,
}

/// Serve every connection with the same status and body, counting requests
pub async fn spawn_stub_server(status_line: &'static str, body: &'static str) -> (SocketAddr, Arc<AtomicUsize>) {
    spawn_routed_stub_server(vec![StubRoute { path_prefix: "/", status_line, body }]).await
}

/// Serve the first route whose prefix matches the request path, 404 otherwise
pub async fn spawn_routed_stub_server(routes: Vec<StubRoute>) -> (SocketAddr, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else { break };
            counter.fetch_add(1, Ordering::SeqCst);
            let routes = routes.clone();
            tokio::spawn(async move {
                let path = read_request(&mut socket).await;
                let (status_line, body) = routes
                    .iter()
                    .find(|route| path.starts_with(route.path_prefix))
                    .map(|route| (route.status_line, route.body))
                    .unwrap_or(("404 Not Found", r#"{"status_message":"not found"}"#));
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, hits)
}

/// Consume headers and a Content-Length body, returning the request path
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let Ok(read) = socket.read(&mut chunk).await else { break };
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);

        let text = String::from_utf8_lossy(&buffer);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buffer.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buffer)
        .lines()
        .next()
        .and_then(|request_line| request_line.split_whitespace().nth(1))
        .unwrap_or_default()
        .to_string()
}
