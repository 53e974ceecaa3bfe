#![allow(dead_code)]

use marine_roster::dispatcher::Dispatcher;
use marine_roster::registry;
use marine_roster::router::Router;
use marine_roster::server::{AppService, HttpServer, ServerHandle};
use marine_roster::static_files::StaticFiles;
use marine_roster::store::MarineStore;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::{Arc, Once};
use std::time::Duration;

static MAY_INIT: Once = Once::new();

/// Configure the may runtime once per test binary.
pub fn setup_may_runtime() {
    MAY_INIT.call_once(|| {
        may::config().set_stack_size(0x8000);
    });
}

/// Start a full service instance with a fresh seeded store.
///
/// Each test gets its own server and roster, so create/mutate tests cannot
/// interfere with each other.
pub fn start_service_with_static_dir(static_dir: PathBuf) -> (ServerHandle, SocketAddr) {
    setup_may_runtime();

    let store = Arc::new(MarineStore::seeded());
    let router = Arc::new(Router::new(registry::route_table()));
    let mut dispatcher = Dispatcher::new();
    unsafe {
        registry::register_all(&mut dispatcher, store);
    }
    let service = AppService::new(router, Arc::new(dispatcher), StaticFiles::new(static_dir));

    // Reserve a free port, then hand it to the server.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let handle = HttpServer(service).start(addr).unwrap();
    handle.wait_ready().unwrap();
    (handle, addr)
}

pub fn start_service() -> (ServerHandle, SocketAddr) {
    start_service_with_static_dir(PathBuf::from("static_site"))
}

/// Send a raw HTTP request and collect the raw response.
pub fn send_request(addr: &SocketAddr, req: &str) -> String {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.write_all(req.as_bytes()).unwrap();
    stream
        .set_read_timeout(Some(Duration::from_millis(200)))
        .unwrap();
    let mut buf = Vec::new();
    loop {
        let mut tmp = [0u8; 1024];
        match stream.read(&mut tmp) {
            Ok(0) => break,
            Ok(n) => buf.extend_from_slice(&tmp[..n]),
            Err(ref e)
                if e.kind() == std::io::ErrorKind::WouldBlock
                    || e.kind() == std::io::ErrorKind::TimedOut =>
            {
                break
            }
            Err(e) => panic!("read error: {:?}", e),
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

pub fn get(addr: &SocketAddr, path: &str) -> String {
    send_request(addr, &format!("GET {path} HTTP/1.1\r\nHost: x\r\n\r\n"))
}

pub fn post_json(addr: &SocketAddr, path: &str, body: &str) -> String {
    send_request(
        addr,
        &format!(
            "POST {path} HTTP/1.1\r\nHost: x\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        ),
    )
}

/// Split a raw response into (status, content type, body).
pub fn parse_response(resp: &str) -> (u16, String, String) {
    let mut parts = resp.splitn(2, "\r\n\r\n");
    let headers = parts.next().unwrap_or("");
    let body = parts.next().unwrap_or("").to_string();
    let mut status = 0;
    let mut content_type = String::new();
    for line in headers.lines() {
        if line.starts_with("HTTP/1.1") {
            status = line
                .split_whitespace()
                .nth(1)
                .unwrap_or("0")
                .parse()
                .unwrap();
        } else if let Some((name, val)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-type") {
                content_type = val.trim().to_string();
            }
        }
    }
    (status, content_type, body)
}

/// Parse a response body as JSON.
pub fn json_body(resp: &str) -> serde_json::Value {
    let (_, _, body) = parse_response(resp);
    serde_json::from_str(body.trim()).unwrap_or_else(|e| panic!("bad JSON body {body:?}: {e}"))
}
