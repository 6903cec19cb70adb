use anyhow::{Context, Result};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::error::AskError;

// Body of POST <endpoint>
#[derive(Serialize)]
struct QuestionRequest<'a> {
    question: &'a str,
}

// Only `answer` matters; anything else the service sends is ignored.
#[derive(Deserialize, Debug)]
struct AnswerResponse {
    answer: String,
}

// The service reports rejected questions as {"error": "..."}
#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// HTTP client for the answering service.
#[derive(Debug, Clone)]
pub struct AnswerClient {
    http: Client,
    endpoint: Url,
    root: Url,
}

impl AnswerClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("Invalid answering service URL: {}", endpoint))?;
        let root = endpoint
            .join("/")
            .with_context(|| format!("Cannot derive service root from {}", endpoint))?;

        // No timeout: a request runs until it settles.
        Ok(Self {
            http: Client::new(),
            endpoint,
            root,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends one question and returns the answer text verbatim.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn ask(&self, question: &str) -> Result<String, AskError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&QuestionRequest { question })
            .send()
            .await
            .map_err(|source| self.transport(source))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| self.transport(source))?;

        if !status.is_success() {
            let body = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            error!(%status, %body, "Answering service rejected the question");
            return Err(AskError::Status { status, body });
        }

        let parsed: AnswerResponse = serde_json::from_str(&body)?;
        debug!(answer_len = parsed.answer.len(), "Received answer");
        Ok(parsed.answer)
    }

    /// Checks the service root, which answers with a plain-text greeting when live.
    #[instrument(skip(self), fields(root = %self.root))]
    pub async fn health(&self) -> Result<String, AskError> {
        let response = self
            .http
            .get(self.root.clone())
            .send()
            .await
            .map_err(|source| self.transport(source))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| self.transport(source))?;

        if !status.is_success() {
            return Err(AskError::Status { status, body });
        }
        Ok(body.trim().to_string())
    }

    fn transport(&self, source: reqwest::Error) -> AskError {
        AskError::Transport {
            endpoint: self.endpoint.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_new_rejects_invalid_url() {
        assert!(AnswerClient::new("not a url").is_err());
    }

    #[test]
    fn test_root_is_derived_from_endpoint() {
        let client = AnswerClient::new("http://127.0.0.1:5000/query").unwrap();
        assert_eq!(client.endpoint().path(), "/query");
        assert_eq!(client.root.as_str(), "http://127.0.0.1:5000/");
    }

    #[tokio::test]
    async fn test_ask_posts_question_and_returns_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .and(body_json(json!({ "question": "What is the leave policy?" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "answer": "You get 20 days.",
                "sources": ["hr_manual.pdf"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AnswerClient::new(&format!("{}/query", server.uri())).unwrap();
        let answer = client.ask("What is the leave policy?").await.unwrap();
        assert_eq!(answer, "You get 20 days.");
    }

    #[tokio::test]
    async fn test_ask_keeps_answer_whitespace() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "answer": "  line one\nline two\n" })),
            )
            .mount(&server)
            .await;

        let client = AnswerClient::new(&server.uri()).unwrap();
        assert_eq!(client.ask("q").await.unwrap(), "  line one\nline two\n");
    }

    #[tokio::test]
    async fn test_ask_non_success_status_carries_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({ "error": "Question is required" })),
            )
            .mount(&server)
            .await;

        let client = AnswerClient::new(&server.uri()).unwrap();
        match client.ask(" ").await {
            Err(AskError::Status { status, body }) => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(body, "Question is required");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_ask_body_without_answer_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "hi" })))
            .mount(&server)
            .await;

        let client = AnswerClient::new(&server.uri()).unwrap();
        assert!(matches!(client.ask("q").await, Err(AskError::Decode(_))));
    }

    #[tokio::test]
    async fn test_ask_non_json_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>tunnel offline</html>"))
            .mount(&server)
            .await;

        let client = AnswerClient::new(&server.uri()).unwrap();
        assert!(matches!(client.ask("q").await, Err(AskError::Decode(_))));
    }

    #[tokio::test]
    async fn test_ask_connection_refused_is_transport_error() {
        // Reserve a port, then free it so nothing is listening there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = AnswerClient::new(&format!("http://127.0.0.1:{}/", port)).unwrap();
        assert!(matches!(
            client.ask("q").await,
            Err(AskError::Transport { .. })
        ));
    }

    #[tokio::test]
    async fn test_health_hits_service_root() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("HR Assistant API is live!\n"))
            .expect(1)
            .mount(&server)
            .await;

        let client = AnswerClient::new(&format!("{}/query", server.uri())).unwrap();
        assert_eq!(client.health().await.unwrap(), "HR Assistant API is live!");
    }
}
