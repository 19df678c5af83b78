//! HTTP relay: re-serves the platform's file host under the caller's own
//! origin, adding a permissive CORS header and hiding the upstream host.
//!
//! One upstream fetch per inbound request; the upstream status, headers,
//! and body stream through unmodified (4xx/5xx included). Any relay-side
//! failure maps to a fixed 500 with a JSON error body.

use std::convert::Infallible;
use std::net::SocketAddr;

use anyhow::Result;
use bytes::Bytes;
use futures_util::TryStreamExt;
use http_body_util::{combinators::UnsyncBoxBody, BodyExt, Full, StreamBody};
use hyper::body::Frame;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use thiserror::Error;
use tokio::net::TcpListener;

// reqwest's body stream is Send but not Sync.
type RelayBody = UnsyncBoxBody<Bytes, std::io::Error>;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("missing 'path' query parameter")]
    MissingPath,
    #[error("upstream fetch failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("response build failed: {0}")]
    Http(#[from] hyper::http::Error),
}

/// Relay server bound to a local address. `bind` then `run`; splitting the
/// two lets callers (and tests) learn the actual port before serving.
pub struct RelayServer {
    listener: TcpListener,
    client: reqwest::Client,
    upstream_origin: String,
}

impl RelayServer {
    pub async fn bind(addr: SocketAddr, upstream_origin: String) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            client: reqwest::Client::new(),
            upstream_origin,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept loop: one spawned task per connection, serving until the
    /// process exits.
    pub async fn run(self) -> Result<()> {
        tracing::info!(
            "relay listening on {}, forwarding to {}",
            self.listener.local_addr()?,
            self.upstream_origin
        );

        loop {
            let (stream, peer) = self.listener.accept().await?;
            let io = TokioIo::new(stream);
            let client = self.client.clone();
            let upstream = self.upstream_origin.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req| {
                    let client = client.clone();
                    let upstream = upstream.clone();
                    async move { handle(req, client, upstream).await }
                });
                if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                    tracing::debug!("relay connection from {}: {}", peer, e);
                }
            });
        }
    }
}

async fn handle(
    req: Request<hyper::body::Incoming>,
    client: reqwest::Client,
    upstream: String,
) -> std::result::Result<Response<RelayBody>, Infallible> {
    match relay(req, client, upstream).await {
        Ok(resp) => Ok(resp),
        Err(e) => {
            tracing::warn!("relay failed: {}", e);
            Ok(error_response())
        }
    }
}

async fn relay(
    req: Request<hyper::body::Incoming>,
    client: reqwest::Client,
    upstream: String,
) -> std::result::Result<Response<RelayBody>, RelayError> {
    let path = path_param(req.uri().query()).ok_or(RelayError::MissingPath)?;
    let target = format!("{}/{}", upstream.trim_end_matches('/'), path);
    tracing::debug!("relaying {}", target);

    let upstream_resp = client.get(&target).send().await?;

    let mut builder = Response::builder().status(upstream_resp.status());
    for (name, value) in upstream_resp.headers() {
        // hyper emits its own framing headers for the re-served body.
        if name == &hyper::header::TRANSFER_ENCODING || name == &hyper::header::CONNECTION {
            continue;
        }
        builder = builder.header(name, value);
    }
    builder = builder.header(hyper::header::ACCESS_CONTROL_ALLOW_ORIGIN, "*");

    let stream = upstream_resp
        .bytes_stream()
        .map_ok(Frame::data)
        .map_err(std::io::Error::other);
    Ok(builder.body(StreamBody::new(stream).boxed_unsync())?)
}

/// Extracts the `path` query parameter (form-urlencoded) from a request.
fn path_param(query: Option<&str>) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "path")
        .map(|(_, value)| value.into_owned())
}

/// Fixed 500 response for any relay-side failure; upstream HTTP errors are
/// not errors here and pass through with their own status.
fn error_response() -> Response<RelayBody> {
    let body = serde_json::json!({ "error": "Failed to relay request." }).to_string();
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(hyper::header::CONTENT_TYPE, "application/json")
        .header(hyper::header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .body(
            Full::new(Bytes::from(body))
                .map_err(|never| match never {})
                .boxed_unsync(),
        )
        .expect("static response builds")
}
