//! Shared fixtures: one mock server per test binary, started on first use.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::OnceLock;
use std::time::Duration;

use rstest::fixture;
use serde_json::Value;
use todo_conformance::{Session, Transport};
use todo_core::{HttpRequest, HttpResponse, TodoClient};

static SERVER: OnceLock<SocketAddr> = OnceLock::new();

fn server_addr() -> SocketAddr {
    *SERVER.get_or_init(|| {
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                mock_server::run(listener).await
            })
            .unwrap();
        });
        addr
    })
}

#[fixture]
pub fn base_url() -> String {
    format!("http://{}/todos", server_addr())
}

#[fixture]
pub fn client(base_url: String) -> TodoClient {
    TodoClient::new(&base_url)
}

#[fixture]
pub fn session() -> Session {
    Session::new(Some(Duration::from_secs(10)))
}

pub fn send(session: &Session, request: HttpRequest) -> HttpResponse {
    session.execute(&request).expect("HTTP transport error")
}

pub fn body_json(response: &HttpResponse) -> Value {
    serde_json::from_str(&response.body).expect("response body is not JSON")
}
