//! Scripted HTTP stub used by the smoke run tests.
#![allow(dead_code)]

use hyper::{
    service::{make_service_fn, service_fn},
    Body, Request, Response, Server, StatusCode,
};
use nginx_smoke_test::config::SmokeConfig;
use std::{
    convert::Infallible,
    net::SocketAddr,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

pub const MARKER_PAGE: &str = "<html><body><h1>Hello from server 1</h1></body></html>";

pub struct StubServer {
    addr: SocketAddr,
    hits: Arc<AtomicU64>,
    connections: Arc<AtomicU64>,
}

impl StubServer {
    /// Serve on an ephemeral localhost port. `respond` receives the 1-based
    /// request number and decides the status and body.
    pub fn start<F>(respond: F) -> Self
    where
        F: Fn(u64) -> (StatusCode, String) + Send + Sync + 'static,
    {
        let respond = Arc::new(respond);
        let hits = Arc::new(AtomicU64::new(0));
        let counter = hits.clone();
        let connections = Arc::new(AtomicU64::new(0));
        let accepted = connections.clone();

        let make_svc = make_service_fn(move |_conn| {
            accepted.fetch_add(1, Ordering::SeqCst);
            let respond = respond.clone();
            let counter = counter.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |_req: Request<Body>| {
                    let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                    let (status, body) = respond(n);
                    async move {
                        Ok::<_, Infallible>(
                            Response::builder()
                                .status(status)
                                .body(Body::from(body))
                                .unwrap(),
                        )
                    }
                }))
            }
        });

        let server = Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0))).serve(make_svc);
        let addr = server.local_addr();
        tokio::spawn(server);

        Self {
            addr,
            hits,
            connections,
        }
    }

    /// Always answer with the same status and body.
    pub fn fixed(status: StatusCode, body: &str) -> Self {
        let body = body.to_string();
        Self::start(move |_| (status, body.clone()))
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::SeqCst)
    }

    /// Number of TCP connections accepted so far.
    pub fn connections(&self) -> u64 {
        self.connections.load(Ordering::SeqCst)
    }
}

/// A localhost port with nothing listening on it.
pub fn refused_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

pub fn local_config(port_ok: u16, port_err: u16) -> SmokeConfig {
    SmokeConfig {
        host: "127.0.0.1".to_string(),
        port_ok,
        port_err,
        ..SmokeConfig::default()
    }
}
