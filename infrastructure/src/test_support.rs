//! Loopback HTTP server for adapter tests.

use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A canned response served to requests whose target starts with `prefix`.
#[derive(Debug, Clone)]
pub struct Route {
    pub prefix: &'static str,
    pub status: &'static str,
    pub body: String,
}

impl Route {
    pub fn ok(prefix: &'static str, body: impl Into<String>) -> Self {
        Self {
            prefix,
            status: "200 OK",
            body: body.into(),
        }
    }

    pub fn status(prefix: &'static str, status: &'static str, body: impl Into<String>) -> Self {
        Self {
            prefix,
            status,
            body: body.into(),
        }
    }
}

/// Serves routes until dropped, recording every raw request.
pub struct MockHttpServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    handle: tokio::task::JoinHandle<()>,
}

impl MockHttpServer {
    pub async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        let handle = tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let routes = routes.clone();
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    serve(socket, &routes, &recorded).await;
                });
            }
        });

        Self {
            base_url,
            requests,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockHttpServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(mut socket: TcpStream, routes: &[Route], recorded: &Mutex<Vec<String>>) {
    let request = read_request(&mut socket).await;
    let target = request.split_whitespace().nth(1).unwrap_or("/").to_string();
    recorded.lock().unwrap().push(request);

    let (status, body) = routes
        .iter()
        .find(|r| target.starts_with(r.prefix))
        .map(|r| (r.status, r.body.clone()))
        .unwrap_or(("404 Not Found", "{}".to_string()));

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        request.extend_from_slice(&buf[..n]);

        let text = String::from_utf8_lossy(&request);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            if request.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&request).into_owned()
}
