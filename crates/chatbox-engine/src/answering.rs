//! Client for the remote answering service.
//!
//! The service maps one user message to one reply string over a single JSON
//! request/response pair:
//!
//! ```text
//! POST /predict   {"message": "<user text>"}
//! 200 OK          {"answer": "<reply>"}
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::intents::IntentsDocument;
use crate::matching::IntentAnswerer;

/// Endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict";

/// Something that can turn a user message into a reply.
#[async_trait]
pub trait Answerer: Send + Sync {
    /// Ask for a reply to `message`.
    async fn answer(&self, message: &str) -> Result<String, AnswerError>;
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    answer: String,
}

/// HTTP client for the `/predict` endpoint.
#[derive(Debug, Clone)]
pub struct HttpAnswerer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAnswerer {
    /// Create a client for `endpoint`.
    ///
    /// With `timeout` unset the transport default applies, which means a
    /// hung server hangs the request.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, AnswerError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    /// Create a client from the endpoint and timeout in `config`.
    pub fn from_config(config: &Config) -> Result<Self, AnswerError> {
        Self::new(config.endpoint.clone(), config.request_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Answerer for HttpAnswerer {
    async fn answer(&self, message: &str) -> Result<String, AnswerError> {
        debug!(endpoint = %self.endpoint, "Requesting prediction");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&PredictRequest { message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnswerError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let parsed: PredictResponse = serde_json::from_slice(&body)?;
        Ok(parsed.answer)
    }
}

/// Build the answerer `config` asks for.
///
/// Offline mode loads the intents document up front; without one every
/// message gets the no-match reply.
pub async fn answerer_from_config(config: &Config) -> Result<Arc<dyn Answerer>, AnswerError> {
    if !config.offline {
        return Ok(Arc::new(HttpAnswerer::from_config(config)?));
    }

    let document = match config.intents.as_deref() {
        Some(source) => IntentsDocument::load_from(source).await,
        None => None,
    };
    if document.is_none() {
        warn!("Offline mode without an intents document; no message will match");
    }
    info!("Answering offline from intent patterns");
    Ok(Arc::new(IntentAnswerer::new(document.unwrap_or_default())))
}

/// Why a reply could not be obtained.
///
/// Every variant ends up as the same fallback message for the user; the
/// distinction only reaches the logs, through [`AnswerError::code`].
#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    /// Connection failure, timeout, or body read failure.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("Answering service returned HTTP {0}")]
    Status(u16),

    /// The body was not JSON or had no string `answer` field.
    #[error("Could not decode reply: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request task died before producing a result.
    #[error("Request aborted: {0}")]
    Aborted(String),
}

impl AnswerError {
    /// Stable diagnostic code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            AnswerError::Transport(_) => "transport",
            AnswerError::Status(_) => "status",
            AnswerError::Decode(_) => "decode",
            AnswerError::Aborted(_) => "aborted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve exactly one HTTP response and hand back the raw request.
    async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        (format!("http://{addr}/predict"), handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    #[tokio::test]
    async fn test_answer_success() {
        let (url, server) = serve_once("200 OK", r#"{"answer":"42"}"#).await;
        let answerer = HttpAnswerer::new(url, None).unwrap();

        let reply = answerer.answer("what is the answer?").await.unwrap();
        assert_eq!(reply, "42");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /predict"));
        assert!(request
            .to_ascii_lowercase()
            .contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"message":"what is the answer?"}"#));
    }

    #[tokio::test]
    async fn test_answer_non_success_status() {
        let (url, server) = serve_once("500 Internal Server Error", r#"{"answer":"nope"}"#).await;
        let answerer = HttpAnswerer::new(url, None).unwrap();

        let err = answerer.answer("hi").await.unwrap_err();
        assert!(matches!(err, AnswerError::Status(500)));
        assert_eq!(err.code(), "status");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_answer_missing_field_is_decode_error() {
        let (url, server) = serve_once("200 OK", r#"{"reply":"wrong field"}"#).await;
        let answerer = HttpAnswerer::new(url, None).unwrap();

        let err = answerer.answer("hi").await.unwrap_err();
        assert!(matches!(err, AnswerError::Decode(_)));
        assert_eq!(err.code(), "decode");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_answer_invalid_json_is_decode_error() {
        let (url, server) = serve_once("200 OK", "<html>oops</html>").await;
        let answerer = HttpAnswerer::new(url, None).unwrap();

        let err = answerer.answer("hi").await.unwrap_err();
        assert_eq!(err.code(), "decode");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_answer_connection_refused_is_transport_error() {
        // Grab a free port, then close it so nothing is listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let answerer = HttpAnswerer::new(format!("http://{addr}/predict"), None).unwrap();
        let err = answerer.answer("hi").await.unwrap_err();
        assert_eq!(err.code(), "transport");
    }

    #[test]
    fn test_from_config_uses_endpoint() {
        let config = Config::default();
        let answerer = HttpAnswerer::from_config(&config).unwrap();
        assert_eq!(answerer.endpoint(), DEFAULT_ENDPOINT);
    }

    #[tokio::test]
    async fn test_offline_config_answers_from_patterns() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("intents.json");
        std::fs::write(
            &path,
            r#"{"intents":[{"tag":"hours","patterns":["opening hours"],"responses":["We are open 9 to 5."]}]}"#,
        )
        .unwrap();
        let config = Config {
            offline: true,
            intents: Some(path.to_string_lossy().into_owned()),
            ..Config::default()
        };

        let answerer = answerer_from_config(&config).await.unwrap();
        assert_eq!(
            answerer.answer("What are the opening hours?").await.unwrap(),
            "We are open 9 to 5."
        );
    }

    #[tokio::test]
    async fn test_offline_config_without_intents_never_matches() {
        let config = Config {
            offline: true,
            intents: None,
            ..Config::default()
        };

        let answerer = answerer_from_config(&config).await.unwrap();
        assert_eq!(
            answerer.answer("hello").await.unwrap(),
            crate::matching::NO_MATCH_REPLY
        );
    }
}
