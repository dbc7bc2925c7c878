// src/test_support.rs
// =============================================================================
// A tiny fake GitHub API for tests.
//
// It listens on 127.0.0.1 with a random port, answers each request from a
// fixed list of routes and records the request targets it saw, so tests can
// check exactly which requests were made (and how many).
//
// Only compiled for tests (see the #[cfg(test)] on the module in main.rs).
// =============================================================================

use crate::github::{Owner, RepositoryRecord};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use url::Url;

#[derive(Debug, Clone)]
pub struct Route {
    path: String,
    status: u16,
    reason: String,
    body: String,
    gate: Option<Arc<Mutex<Option<oneshot::Receiver<()>>>>>,
}

impl Route {
    // 200 OK with a JSON body
    pub fn ok(path: &str, body: &str) -> Self {
        Self {
            path: path.to_string(),
            status: 200,
            reason: "OK".to_string(),
            body: body.to_string(),
            gate: None,
        }
    }

    // An error status with a GitHub-style JSON message
    pub fn status(path: &str, status: u16, reason: &str) -> Self {
        Self {
            path: path.to_string(),
            status,
            reason: reason.to_string(),
            body: format!(r#"{{"message": "{}"}}"#, reason),
            gate: None,
        }
    }

    // Holds the answer back until the returned sender fires (or is dropped)
    pub fn gated(mut self) -> (Self, oneshot::Sender<()>) {
        let (release, wait) = oneshot::channel();
        self.gate = Some(Arc::new(Mutex::new(Some(wait))));
        (self, release)
    }
}

pub struct FakeGithub {
    pub base: Url,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeGithub {
    pub async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(routes);

        let seen = requests.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let seen = seen.clone();
                let routes = routes.clone();
                tokio::spawn(async move {
                    serve(stream, &routes, &seen).await;
                });
            }
        });

        Self {
            base: Url::parse(&format!("http://{}", addr)).unwrap(),
            requests,
        }
    }

    // Request targets (path plus query) in arrival order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn serve(mut stream: TcpStream, routes: &[Route], seen: &Mutex<Vec<String>>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let head = String::from_utf8_lossy(&buf);
    let target = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    seen.lock().unwrap().push(target.clone());

    let path = target.split('?').next().unwrap_or("");
    let route = routes
        .iter()
        .find(|r| r.path == path)
        .cloned()
        .unwrap_or_else(|| Route::status(path, 404, "Not Found"));

    let wait = route.gate.as_ref().and_then(|gate| gate.lock().unwrap().take());
    if let Some(wait) = wait {
        let _ = wait.await;
    }

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        route.status,
        route.reason,
        route.body.len(),
        route.body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

// A base URL where nothing is listening, for connection failures
pub async fn unreachable_base() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}", addr)).unwrap()
}

pub fn record(owner: &str, name: &str, issues: u64) -> RepositoryRecord {
    RepositoryRecord {
        name: name.to_string(),
        owner: Owner {
            login: owner.to_string(),
        },
        open_issues_count: issues,
    }
}
