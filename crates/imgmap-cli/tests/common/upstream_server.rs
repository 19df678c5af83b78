//! Minimal HTTP/1.1 server standing in for the upstream file host in relay
//! tests. Serves a single static body with a configurable status and
//! content type.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Copy)]
pub struct UpstreamOptions {
    pub status: u16,
    pub reason: &'static str,
    pub content_type: &'static str,
}

impl Default for UpstreamOptions {
    fn default() -> Self {
        Self {
            status: 200,
            reason: "OK",
            content_type: "image/png",
        }
    }
}

/// Starts a server in a background thread serving `body`. Returns the base
/// URL (e.g. "http://127.0.0.1:12345"). The server runs until the process
/// exits.
pub fn start(body: Vec<u8>) -> String {
    start_with_options(body, UpstreamOptions::default())
}

/// Like `start` but with a custom status/content type (e.g. upstream 404).
pub fn start_with_options(body: Vec<u8>, opts: UpstreamOptions) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            thread::spawn(move || handle(stream, &body, opts));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: std::net::TcpStream, body: &[u8], opts: UpstreamOptions) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    if stream.read(&mut buf).unwrap_or(0) == 0 {
        return;
    }
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        opts.status,
        opts.reason,
        opts.content_type,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}
