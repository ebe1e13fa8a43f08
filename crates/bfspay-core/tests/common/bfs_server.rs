//! Minimal HTTP/1.1 server standing in for the BFS checkStatus endpoint or a
//! merchant webhook.
//!
//! Answers every POST with a fixed status and body and records the requests
//! it received so tests can inspect what was sent.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub struct BfsServer {
    /// Base URL, e.g. "http://127.0.0.1:12345/".
    pub url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

#[derive(Debug, Clone)]
pub struct Recorded {
    /// Request line and headers.
    pub head: String,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head
            .lines()
            .filter_map(|l| l.split_once(':'))
            .find(|(n, _)| n.trim().eq_ignore_ascii_case(name))
            .map(|(_, v)| v.trim())
    }
}

impl BfsServer {
    pub fn status_url(&self) -> String {
        format!("{}BFSSecure/checkStatus", self.url)
    }

    pub fn webhook_url(&self) -> String {
        format!("{}merchant/webhook", self.url)
    }

    /// Bodies of all requests received so far.
    pub fn requests(&self) -> Vec<String> {
        self.recorded().into_iter().map(|r| r.body).collect()
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread replying `200 OK` with `reply`.
pub fn start(reply: String) -> BfsServer {
    start_with_status(200, reply)
}

pub fn start_with_status(status: u16, reply: String) -> BfsServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);
    let reply = Arc::new(reply);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let recorded = Arc::clone(&recorded);
            let reply = Arc::clone(&reply);
            thread::spawn(move || handle(stream, status, &reply, &recorded));
        }
    });
    BfsServer {
        url: format!("http://127.0.0.1:{}/", port),
        requests,
    }
}

fn handle(mut stream: TcpStream, status: u16, reply: &str, recorded: &Mutex<Vec<Recorded>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let Some(request) = read_request(&mut stream) else {
        return;
    };
    recorded.lock().unwrap().push(request);
    let reason = if status == 200 { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        reply.len(),
        reply
    );
    let _ = stream.write_all(response.as_bytes());
}

/// Reads headers, then exactly `Content-Length` bytes of body.
fn read_request(stream: &mut TcpStream) -> Option<Recorded> {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };
    let head = String::from_utf8(data[..header_end].to_vec()).ok()?;
    let content_length = head
        .lines()
        .filter_map(|l| l.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while data.len() < header_end + content_length {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
    }
    let end = (header_end + content_length).min(data.len());
    let body = String::from_utf8(data[header_end..end].to_vec()).ok()?;
    Some(Recorded {
        head,
        body,
    })
}
