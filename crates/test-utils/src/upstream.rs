//! Fake coverage providers served from a local port.

use std::net::SocketAddr;

use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// One canned response served by [`FakeUpstream`].
#[derive(Debug, Clone)]
pub struct FakeRoute {
    pub path: String,
    pub status: StatusCode,
    pub body: Value,
}

impl FakeRoute {
    pub fn ok(path: impl Into<String>, body: Value) -> Self {
        Self {
            path: path.into(),
            status: StatusCode::OK,
            body,
        }
    }

    pub fn status(path: impl Into<String>, status: u16) -> Self {
        Self {
            path: path.into(),
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body: json!({ "error": "unavailable" }),
        }
    }
}

/// An HTTP server on an ephemeral `127.0.0.1` port serving canned JSON.
///
/// The server stops when the value is dropped.
pub struct FakeUpstream {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl FakeUpstream {
    /// Start a server. The closure receives the server's base URL so routes
    /// can point at each other (the VATSIM status document lists mirrors).
    pub async fn start<F>(routes: F) -> Self
    where
        F: FnOnce(&str) -> Vec<FakeRoute>,
    {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake upstream");
        let addr = listener.local_addr().expect("fake upstream address");
        let base_url = format!("http://{}", addr);

        let mut app = Router::new();
        for route in routes(&base_url) {
            let FakeRoute { path, status, body } = route;
            app = app.route(
                &path,
                get(move || {
                    let body = body.clone();
                    async move { (status, Json(body)) }
                }),
            );
        }

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }
}

impl Drop for FakeUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// VATSIM status document listing the given data-feed mirrors.
pub fn vatsim_status(mirrors: &[String]) -> Value {
    json!({
        "data": {
            "v3": mirrors,
            "servers": []
        },
        "user": ["https://stats.vatsim.net/search_id.php"]
    })
}

/// VATSIM data feed with repeated, sentinel and malformed codes.
pub fn vatsim_feed() -> Value {
    json!({
        "general": { "version": 3, "connected_clients": 5 },
        "pilots": [
            {
                "cid": 1, "callsign": "TAP123",
                "flight_plan": { "departure": "LPPT", "arrival": "EDDM", "alternate": "EDDN" }
            },
            {
                "cid": 2, "callsign": "DLH456",
                "flight_plan": { "departure": "EDDM", "arrival": "LPPT", "alternate": "NONE" }
            },
            {
                "cid": 3, "callsign": "N123AB",
                "flight_plan": null
            },
            {
                "cid": 4, "callsign": "BAW789",
                "flight_plan": { "departure": "LPPT", "arrival": "KJFK1", "alternate": "" }
            },
            {
                "cid": 5, "callsign": "VFR1"
            }
        ],
        "controllers": []
    })
}

/// POSCON online feed.
pub fn poscon_feed() -> Value {
    json!({
        "flights": [
            {
                "callsign": "AAL1",
                "flightplan": { "dep": "KJFK", "dest": "KLAX", "altnt": "KSFO", "altnt2": "KLAS" }
            },
            {
                "callsign": "AAL2",
                "flightplan": { "dep": "KJFK", "dest": "KBOS", "altnt": null, "altnt2": "" }
            },
            {
                "callsign": "N1",
                "flightplan": null
            },
            {
                "callsign": "N2"
            }
        ],
        "atc": []
    })
}

/// SimToolkitPro flights feed: opaque keys mapped to fixed-position rows.
pub fn stp_feed() -> Value {
    json!({
        "a1": ["x", "TAP1", 0, 0, 0, 0, 0, "LPPT", "LPFR"],
        "b2": ["x", "TAP2", 0, 0, 0, 0, 0, "LPPT", "-"],
        "c3": ["x", "TAP3", 0, 0, 0, 0, 0, "-", "LPMA"],
        "d4": ["x", "TAP4", 0, 0, 0, 0, 0, "LPPTX", "LPFR"],
        "e5": ["short"]
    })
}
