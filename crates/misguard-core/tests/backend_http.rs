//! Integration tests for [`BackendClient`] against a throwaway local HTTP stub.
//!
//! The stub answers exactly one request per connection with a canned status
//! line and body, which is all the client needs.

use std::time::Duration;

use misguard_core::{AnalysisMode, BackendClient, FormInput, GuardError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Spawn a stub that replies to every connection with `status` and `body`.
/// Returns the base URL and a receiver for the raw requests it saw.
async fn stub(status: &'static str, body: &'static str) -> (String, tokio::sync::mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let Ok((mut sock, _)) = listener.accept().await else {
                break;
            };
            let tx = tx.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 16 * 1024];
                let mut read = 0;
                // Read until headers plus declared body have arrived.
                loop {
                    let n = sock.read(&mut buf[read..]).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    read += n;
                    let text = String::from_utf8_lossy(&buf[..read]).to_string();
                    if let Some(head_end) = text.find("\r\n\r\n") {
                        let len = text[..head_end]
                            .lines()
                            .find_map(|l| {
                                let lower = l.to_ascii_lowercase();
                                lower
                                    .strip_prefix("content-length:")
                                    .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                            })
                            .unwrap_or(0);
                        if read >= head_end + 4 + len {
                            break;
                        }
                    }
                }
                let _ = tx.send(String::from_utf8_lossy(&buf[..read]).to_string());
                let resp = format!(
                    "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = sock.write_all(resp.as_bytes()).await;
                let _ = sock.shutdown().await;
            });
        }
    });

    (format!("http://{addr}"), rx)
}

fn client() -> BackendClient {
    BackendClient::new(Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn status_2xx_is_connected_regardless_of_body() {
    let (url, mut seen) = stub("200 OK", "not even json").await;
    assert!(client().probe(&url).await);
    let req = seen.recv().await.unwrap();
    assert!(req.starts_with("GET /api/status "));
}

#[tokio::test]
async fn status_non_2xx_is_disconnected() {
    let (url, _seen) = stub("503 Service Unavailable", "{}").await;
    assert!(!client().probe(&url).await);
    let err = client().check_status(&url).await.unwrap_err();
    assert!(matches!(err, GuardError::Status { status: 503, .. }));
}

#[tokio::test]
async fn unreachable_backend_is_disconnected() {
    // Bind then drop to get a port nobody is listening on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    assert!(!client().probe(&format!("http://{addr}")).await);
}

#[tokio::test]
async fn analyze_posts_form_and_maps_response() {
    let body = r#"{
        "credibility_score": 0.31,
        "analysis": {
            "confidence": 0.6,
            "bias_score": 0.5,
            "readability": "Medium",
            "sources_found": ["https://a.example"],
            "fact_check_results": [{"claim": "x"}, {"claim": "y"}, {"claim": "z"}],
            "summary": "Mixed.",
            "recommendations": ["Verify."]
        }
    }"#;
    let (url, mut seen) = stub("200 OK", body).await;
    let request = FormInput::example().to_request(AnalysisMode::Advanced);

    let report = client().analyze(&url, &request).await.unwrap();
    assert_eq!(report.credibility_score, 0.31);
    assert_eq!(report.fact_check_count, 3);
    assert_eq!(report.sources_found, vec!["https://a.example".to_string()]);
    assert_eq!(report.band().label(), "Low Credibility");

    let raw = seen.recv().await.unwrap();
    assert!(raw.starts_with("POST /api/analyze "));
    let json_start = raw.find("\r\n\r\n").unwrap() + 4;
    let sent: serde_json::Value = serde_json::from_str(&raw[json_start..]).unwrap();
    assert_eq!(sent["mode"], "advanced");
    assert_eq!(sent["url"], "https://example-tech-news.com/quantum-breakthrough");
    assert!(sent["text"].as_str().unwrap().starts_with("Researchers at MIT"));
}

#[tokio::test]
async fn analyze_rejects_garbage_body() {
    let (url, _seen) = stub("200 OK", "<html>oops</html>").await;
    let request = FormInput::example().to_request(AnalysisMode::Basic);
    let err = client().analyze(&url, &request).await.unwrap_err();
    assert!(matches!(err, GuardError::Decode(_)));
}
