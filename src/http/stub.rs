//! Scripted HTTP/1.1 server on a loopback port, for exercising `StockHttp`
//! and the client caches without a backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Respond { status: u16, body: String },
    /// Read the request and never answer.
    Hang,
}

pub(crate) fn reply(status: u16, body: &str) -> Reply {
    Reply::Respond {
        status,
        body: body.to_string(),
    }
}

pub(crate) struct StubServer {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl StubServer {
    /// Answer connections with `replies` in order; the last one repeats.
    pub(crate) async fn start(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                let next = replies
                    .get(n)
                    .or(replies.last())
                    .cloned()
                    .unwrap_or_else(|| reply(200, "{}"));
                tokio::spawn(serve(socket, next));
            }
        });

        Self { url, hits }
    }

    /// Connections accepted so far. Every response closes its connection,
    /// so this is the number of requests.
    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn serve(mut socket: TcpStream, reply: Reply) {
    read_request(&mut socket).await;
    match reply {
        Reply::Hang => {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        Reply::Respond { status, body } => {
            let response = format!(
                "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    }
}

/// Consume the request head and any `Content-Length` body.
async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..head_end]).to_ascii_lowercase();
        let body_len = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= head_end + 4 + body_len {
            return;
        }
    }
}
