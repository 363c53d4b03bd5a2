//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread;

/// Minimal HTTP server answering every request with one canned response.
///
/// Serves `requests` connections, then the thread exits.
pub struct StubCatalogServer {
    pub base_url: String,
}

impl StubCatalogServer {
    pub fn start(status: u16, reason: &str, body: &str, requests: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let port = listener.local_addr().expect("stub server address").port();

        let response = format!(
            "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        thread::spawn(move || {
            for stream in listener.incoming().take(requests) {
                let Ok(mut stream) = stream else { continue };

                // Drain the request head before answering
                let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
                let mut line = String::new();
                while reader.read_line(&mut line).map(|n| n > 0).unwrap_or(false) {
                    if line == "\r\n" {
                        break;
                    }
                    line.clear();
                }

                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
        }
    }
}

/// Upstream catalog in the models.dev shape with a few providers
pub fn upstream_catalog() -> String {
    serde_json::json!({
        "gitlab": {
            "id": "gitlab",
            "name": "GitLab Duo",
            "models": {
                "duo-chat-haiku-4-5": {"id": "duo-chat-haiku-4-5", "tool_call": true},
                "duo-chat-sonnet-4-5": {"id": "duo-chat-sonnet-4-5", "tool_call": true}
            }
        },
        "anthropic": {"id": "anthropic", "models": {"claude-haiku-4-5": {}}},
        "openai": {"id": "openai", "models": {"gpt-5": {}}},
        "google": {"id": "google", "models": {}}
    })
    .to_string()
}

/// Write an executable shell script
#[cfg(unix)]
pub fn write_script(path: &Path, content: &str) {
    use std::os::unix::fs::PermissionsExt;

    std::fs::create_dir_all(path.parent().expect("script parent")).expect("create script dir");
    std::fs::write(path, content).expect("write script");
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .expect("chmod script");
}
