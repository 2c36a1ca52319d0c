//! Minimal HTTP/1.1 server for fetch tests.
//!
//! Answers every connection with one response chosen from the request line,
//! then closes it.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::thread;

type Route = dyn Fn(&str) -> (&'static str, &'static str) + Send + Sync;

pub struct TestServer {
    pub base: String,
    pub hits: Arc<AtomicUsize>,
    pub last_request: Arc<RwLock<String>>,
}

/// Serves `status` and `body` to every request until the process exits.
pub fn serve(status: &'static str, body: &'static str) -> TestServer {
    serve_with(move |_| (status, body))
}

/// Like `serve` but picks `(status, body)` from the request line.
pub fn serve_with<F>(route: F) -> TestServer
where
    F: Fn(&str) -> (&'static str, &'static str) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let hits = Arc::new(AtomicUsize::new(0));
    let last_request = Arc::new(RwLock::new(String::new()));
    let (h, l) = (Arc::clone(&hits), Arc::clone(&last_request));
    let route: Arc<Route> = Arc::new(route);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            h.fetch_add(1, Ordering::SeqCst);
            handle(stream, route.as_ref(), &l);
        }
    });
    TestServer {
        base: format!("http://127.0.0.1:{}/cdx", port),
        hits,
        last_request,
    }
}

fn handle(mut stream: TcpStream, route: &Route, last: &RwLock<String>) {
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(n) => n,
        Err(_) => return,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let line = request.lines().next().unwrap_or("").to_string();
    let (status, body) = route(&line);
    *last.write().unwrap() = line;
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}
