//! HTTP client for the answer service (POST /ask) and the request worker.

use serde::Deserialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::AskError;

/// Parsed `/ask` reply. Empty or non-string fields count as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AskResponse {
    pub answer: Option<String>,
    pub citation: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAskResponse {
    #[serde(default)]
    answer: Value,
    #[serde(default)]
    citation: Value,
}

fn non_empty_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

impl AskResponse {
    /// Decode a response body. Anything that is JSON is accepted; only the
    /// string `answer` and `citation` fields are used.
    pub fn from_body(body: &str) -> Result<Self, AskError> {
        let value: Value = serde_json::from_str(body)?;
        let raw: RawAskResponse = serde_json::from_value(value).unwrap_or_default();
        Ok(Self {
            answer: non_empty_string(raw.answer),
            citation: non_empty_string(raw.citation),
        })
    }
}

pub type AskResult = Result<AskResponse, AskError>;

#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    client: reqwest::Client,
}

impl BackendClient {
    pub fn new(base_url: String) -> Self {
        Self { base_url, client: reqwest::Client::new() }
    }

    /// Post `query` as form data to `/ask`.
    pub async fn ask(&self, query: &str) -> AskResult {
        let url = format!("{}/ask", self.base_url.trim_end_matches('/'));
        let resp = self
            .client
            .post(&url)
            .form(&[("query", query)])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            warn!(%status, "ask endpoint returned an error status");
        }
        let body = resp.text().await?;
        AskResponse::from_body(&body)
    }
}

/// Channel ends the UI holds: queries out, results in.
pub struct WorkerHandle {
    pub requests: mpsc::UnboundedSender<String>,
    pub responses: mpsc::UnboundedReceiver<AskResult>,
}

/// Spawn the request worker on the current runtime. Queries are answered one
/// at a time, in order.
pub fn spawn_worker(client: BackendClient) -> WorkerHandle {
    let (req_tx, mut req_rx) = mpsc::unbounded_channel::<String>();
    let (resp_tx, resp_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Some(query) = req_rx.recv().await {
            let result = client.ask(&query).await;
            match &result {
                Ok(r) => debug!(has_answer = r.answer.is_some(), has_citation = r.citation.is_some(), "ask completed"),
                Err(e) => warn!(error = %e, "ask failed"),
            }
            if resp_tx.send(result).is_err() {
                break;
            }
        }
    });

    WorkerHandle { requests: req_tx, responses: resp_rx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn test_parses_answer_and_citation() {
        let r = AskResponse::from_body(r#"{"query":"q","answer":"Hello","citation":"Doc A"}"#).unwrap();
        assert_eq!(r.answer.as_deref(), Some("Hello"));
        assert_eq!(r.citation.as_deref(), Some("Doc A"));
    }

    #[test]
    fn test_missing_or_malformed_fields_are_absent() {
        let r = AskResponse::from_body(r#"{"detail":"Field required"}"#).unwrap();
        assert_eq!(r, AskResponse::default());
        let r = AskResponse::from_body(r#"{"answer":42,"citation":""}"#).unwrap();
        assert_eq!(r, AskResponse::default());
        let r = AskResponse::from_body(r#""just text""#).unwrap();
        assert_eq!(r, AskResponse::default());
    }

    #[test]
    fn test_non_json_body_is_decode_error() {
        let err = AskResponse::from_body("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, AskError::Decode(_)));
    }

    /// Serve one canned HTTP response and hand back the raw request.
    async fn serve_once(reply: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let len = text[..head_end]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length").then(|| value.trim().parse::<usize>().ok())?
                        })
                        .unwrap_or(0);
                    if raw.len() >= head_end + 4 + len {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                reply.len(),
                reply
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&raw).to_string()
        });
        (format!("http://{addr}"), handle)
    }

    #[tokio::test]
    async fn test_posts_query_as_form_data() {
        let (base_url, server) = serve_once(r#"{"answer":"Section 1 applies.","citation":"Doc A"}"#).await;
        let client = BackendClient::new(format!("{base_url}/"));
        let resp = client.ask("what is section 1?").await.unwrap();
        assert_eq!(resp.answer.as_deref(), Some("Section 1 applies."));
        assert_eq!(resp.citation.as_deref(), Some("Doc A"));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /ask HTTP/1.1"));
        assert!(request.to_lowercase().contains("content-type: application/x-www-form-urlencoded"));
        assert!(request.ends_with("query=what+is+section+1%3F"));
    }

    #[tokio::test]
    async fn test_worker_reports_transport_failure() {
        // bind then drop to get a port nobody listens on
        let addr = TcpListener::bind("127.0.0.1:0").await.unwrap().local_addr().unwrap();
        let mut worker = spawn_worker(BackendClient::new(format!("http://{addr}")));
        worker.requests.send("hello".into()).unwrap();
        let result = worker.responses.recv().await.unwrap();
        assert!(matches!(result, Err(AskError::Transport(_))));
    }
}
