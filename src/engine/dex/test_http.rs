// Scripted HTTP/1.1 responder on 127.0.0.1 for tests of the JSON-RPC and
// routing-service clients. The n-th request gets the n-th response; once the
// script runs out the last response repeats.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub struct StubServer {
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub async fn start(script: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let script = Arc::new(script);

        let seen = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else { break };
                let seen = seen.clone();
                let script = script.clone();
                tokio::spawn(async move {
                    let request = read_request(&stream).await;
                    let n = {
                        let mut seen = seen.lock();
                        seen.push(request);
                        seen.len() - 1
                    };
                    let (status, body) = script
                        .get(n)
                        .or_else(|| script.last())
                        .cloned()
                        .unwrap_or((500, String::new()));
                    respond(stream, status, &body).await;
                });
            }
        });

        Self { url, requests }
    }

    /// Shorthand for a script of JSON-RPC `result` envelopes, all HTTP 200.
    pub async fn json_rpc(results: Vec<serde_json::Value>) -> Self {
        let script = results
            .into_iter()
            .map(|r| (200, serde_json::json!({ "jsonrpc": "2.0", "id": 1, "result": r }).to_string()))
            .collect();
        Self::start(script).await
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

async fn read_request(stream: &TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        stream.readable().await.ok();
        match stream.try_read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if request_complete(&buf) {
                    break;
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => continue,
            Err(_) => break,
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn request_complete(buf: &[u8]) -> bool {
    let text = String::from_utf8_lossy(buf);
    let Some(header_end) = text.find("\r\n\r\n") else { return false };
    let content_length = text[..header_end]
        .lines()
        .find_map(|l| {
            let (name, value) = l.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    buf.len() >= header_end + 4 + content_length
}

async fn respond(mut stream: TcpStream, status: u16, body: &str) {
    let response = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await.ok();
    stream.shutdown().await.ok();
    // drain so the client sees a clean close
    let mut sink = [0u8; 64];
    let _ = stream.read(&mut sink).await;
}
