use serde_json::Value;
use thiserror::Error;

use super::{
    content::ContentBatch,
    params::{Mode, RequestParameters},
    payload::GenerateRequest,
    prompt::{build_prompt, response_schema},
};
use crate::config::GeminiConfig;

const UNKNOWN_SERVICE_ERROR: &str = "unknown error from the generation service";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("invalid activity parameters: {0}")]
    InvalidParameters(String),

    #[error("request failed with status {status}: {message}")]
    ServiceError { status: u16, message: String },

    #[error("the generation service returned no content")]
    EmptyResponse,

    #[error("the generation service returned malformed content: {0}")]
    MalformedContent(String),

    #[error("could not reach the generation service: {0}")]
    Transport(String),
}

/// Raw HTTP outcome. Non-2xx statuses are data here, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a JSON body and hands back whatever the server answered.
///
/// Returns [`RequestError::Transport`] only when no response arrived at all.
pub trait Transport {
    fn post_json(&self, url: &str, payload: &GenerateRequest) -> Result<HttpResponse, RequestError>;
}

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(config: &GeminiConfig) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(config.timeout).build(),
        }
    }
}

impl Transport for UreqTransport {
    fn post_json(
        &self,
        url: &str,
        payload: &GenerateRequest,
    ) -> Result<HttpResponse, RequestError> {
        let result = self
            .agent
            .post(url)
            .set("Content-Type", "application/json")
            .send_json(payload);

        into_http_response(result)
    }
}

/// Turns a `ureq` outcome into an [`HttpResponse`], keeping error statuses.
fn into_http_response(
    result: Result<ureq::Response, ureq::Error>,
) -> Result<HttpResponse, RequestError> {
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(_, response)) => response,
        Err(ureq::Error::Transport(t)) => return Err(RequestError::Transport(describe(&t))),
    };

    let status = response.status();
    let body = response
        .into_string()
        .map_err(|e| RequestError::Transport(format!("failed to read response body: {}", e)))?;

    Ok(HttpResponse { status, body })
}

// the url carries the api key, so only kind and message go into the text
fn describe(transport: &ureq::Transport) -> String {
    match transport.message() {
        Some(message) => format!("{}: {}", transport.kind(), message),
        None => transport.kind().to_string(),
    }
}

/// Builds prompts, calls the generation service once per request and parses
/// what comes back. Holds no state between calls.
pub struct ContentRequester<T = UreqTransport> {
    config: GeminiConfig,
    transport: T,
}

impl ContentRequester<UreqTransport> {
    pub fn new(config: GeminiConfig) -> Self {
        let transport = UreqTransport::new(&config);
        Self { config, transport }
    }
}

impl<T: Transport> ContentRequester<T> {
    pub fn with_transport(config: GeminiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn request_content(
        &self,
        category: &str,
        level: &str,
        mode: Mode,
    ) -> Result<ContentBatch, RequestError> {
        let params = RequestParameters::new(category, level, mode)?;
        self.request(&params)
    }

    pub fn request(&self, params: &RequestParameters) -> Result<ContentBatch, RequestError> {
        log::info!(
            "requesting content: category={}, level={}, effective level={}, mode={}",
            params.category,
            params.level,
            params.effective_level(),
            params.mode
        );

        let payload = GenerateRequest::new(build_prompt(params), response_schema(params.mode));

        self.send(&payload, params.mode).inspect_err(|e| {
            log::error!(
                "content request for {}/{} ({}) failed: {}",
                params.category,
                params.level,
                params.mode,
                e
            )
        })
    }

    fn send(&self, payload: &GenerateRequest, mode: Mode) -> Result<ContentBatch, RequestError> {
        let response = self.transport.post_json(&self.config.endpoint(), payload)?;

        if !response.is_success() {
            return Err(RequestError::ServiceError {
                status: response.status,
                message: service_message(&response.body)
                    .unwrap_or_else(|| UNKNOWN_SERVICE_ERROR.to_string()),
            });
        }

        let text = candidate_text(&response.body).ok_or(RequestError::EmptyResponse)?;
        log::debug!("received {} bytes of {} content", text.len(), mode);

        ContentBatch::parse(mode, &text)
    }
}

/// `error.message` of a failed call, if the body carries one.
fn service_message(body: &str) -> Option<String> {
    let body: Value = serde_json::from_str(body).ok()?;
    body.get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .filter(|m| !m.trim().is_empty())
        .map(|m| m.to_string())
}

/// `candidates[0].content.parts[0].text` of a successful call.
fn candidate_text(body: &str) -> Option<String> {
    let body: Value = serde_json::from_str(body).ok()?;
    body.get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(|t| t.as_str())
        .map(|t| t.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_service_error_message() {
        let body = json!({"error": {"code": 429, "message": "quota exceeded"}}).to_string();
        assert_eq!(service_message(&body).as_deref(), Some("quota exceeded"));
        assert_eq!(service_message("<html>bad gateway</html>"), None);
        assert_eq!(service_message(r#"{"error": {}}"#), None);
    }

    #[test]
    fn reads_first_candidate_text() {
        let body = json!({
            "candidates": [
                {"content": {"parts": [{"text": "first"}, {"text": "second"}]}},
                {"content": {"parts": [{"text": "other"}]}}
            ]
        })
        .to_string();
        assert_eq!(candidate_text(&body).as_deref(), Some("first"));
    }

    #[test]
    fn missing_candidate_path_yields_nothing() {
        for body in [
            json!({"candidates": []}).to_string(),
            json!({}).to_string(),
            json!({"candidates": [{"content": {"parts": []}}]}).to_string(),
            json!({"candidates": [{"finishReason": "SAFETY"}]}).to_string(),
            "not json".to_string(),
        ] {
            assert_eq!(candidate_text(&body), None, "{body}");
        }
    }

    #[test]
    fn only_2xx_is_success() {
        let response = |status| HttpResponse {
            status,
            body: String::new(),
        };
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(!response(301).is_success());
        assert!(!response(500).is_success());
    }

    #[test]
    fn error_status_keeps_its_body() {
        let body = r#"{"error": {"message": "quota exceeded"}}"#;
        let response = ureq::Response::new(500, "Internal Server Error", body).unwrap();

        let converted = into_http_response(Err(ureq::Error::Status(500, response))).unwrap();
        assert_eq!(
            converted,
            HttpResponse {
                status: 500,
                body: body.to_string()
            }
        );

        let ok = ureq::Response::new(200, "OK", "{}").unwrap();
        assert!(into_http_response(Ok(ok)).unwrap().is_success());
    }

    #[test]
    fn transport_failure_message_leaves_out_the_key() {
        let agent = ureq::AgentBuilder::new()
            .timeout(std::time::Duration::from_secs(2))
            .build();
        let url = "http://127.0.0.1:1/models/m:generateContent?key=very-secret-key";
        let result = agent.post(url).send_string("{}");
        assert!(matches!(result, Err(ureq::Error::Transport(_))));

        match into_http_response(result) {
            Err(RequestError::Transport(message)) => {
                assert!(!message.is_empty());
                assert!(!message.contains("very-secret-key"), "{message}");
            }
            other => panic!("expected a transport error, got {other:?}"),
        }
    }

    #[test]
    fn errors_render_user_visible_messages() {
        let err = RequestError::ServiceError {
            status: 500,
            message: "quota exceeded".to_string(),
        };
        assert_eq!(err.to_string(), "request failed with status 500: quota exceeded");
    }
}
