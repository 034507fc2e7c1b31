//! Mock profile backend server for testing
//!
//! A tiny HTTP/1.1 server on a random local port that answers the three
//! endpoints with canned responses and records every request line it saw:
//! - GET /user
//! - GET /project
//! - POST /logout

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::json;

/// Canned response for one endpoint
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(value: serde_json::Value) -> Self {
        Self::new(200, value.to_string())
    }
}

/// Responses served by the mock
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub user: MockResponse,
    pub projects: MockResponse,
    pub logout: MockResponse,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            user: MockResponse::json(json!({
                "id": "u-1",
                "name": "Ada Lovelace",
                "email": "ada@example.com"
            })),
            projects: MockResponse::json(json!([
                {"name": "Imaging", "projectId": "imaging-01"},
                {"name": "Archive", "projectId": "archive-02"}
            ])),
            logout: MockResponse::new(204, ""),
        }
    }
}

/// Mock backend server
pub struct MockBackendServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<String>>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

impl MockBackendServer {
    /// Start a mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(Mutex::new(Vec::new()));

        // Non-blocking accept so stop() can end the loop
        listener.set_nonblocking(true)?;

        let running_clone = running.clone();
        let requests_clone = requests.clone();
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        handle_connection(stream, &config, &requests_clone);
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Request lines received so far, e.g. "GET /user"
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received for `method path`
    pub fn count(&self, request_line: &str) -> usize {
        self.requests().iter().filter(|r| *r == request_line).count()
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockBackendServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig, requests: &Mutex<Vec<String>>) {
    // Accepted sockets may inherit non-blocking mode on some platforms
    let _ = stream.set_nonblocking(false);

    let mut buffer = [0; 4096];
    let n = match stream.read(&mut buffer) {
        Ok(n) => n,
        Err(_) => return,
    };
    let request = String::from_utf8_lossy(&buffer[..n]);

    let first_line = request.lines().next().unwrap_or("");
    let parts: Vec<&str> = first_line.split_whitespace().collect();
    if parts.len() < 2 {
        send_response(&mut stream, &MockResponse::new(400, r#"{"error": "Invalid request"}"#));
        return;
    }

    let method = parts[0];
    let path = parts[1].split('?').next().unwrap_or(parts[1]);
    requests.lock().unwrap().push(format!("{} {}", method, path));

    let response = match (method, path) {
        ("GET", "/user") => config.user.clone(),
        ("GET", "/project") => config.projects.clone(),
        ("POST", "/logout") => config.logout.clone(),
        (_, "/user" | "/project" | "/logout") => {
            MockResponse::new(405, r#"{"error": "Method not allowed"}"#)
        }
        _ => MockResponse::new(404, r#"{"error": "Endpoint not found"}"#),
    };

    send_response(&mut stream, &response);
}

fn send_response(stream: &mut TcpStream, response: &MockResponse) {
    let content_type = if serde_json::from_str::<serde_json::Value>(&response.body).is_ok() {
        "application/json"
    } else {
        "text/plain"
    };
    let raw = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        reason_phrase(response.status),
        content_type,
        response.body.len(),
        response.body
    );
    let _ = stream.write_all(raw.as_bytes());
    let _ = stream.flush();
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "Unknown",
    }
}
