use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    /// Non-2xx reply. `detail` is the server's message when it sent one.
    #[error("{detail}")]
    Status { status: u16, detail: String },
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Build a status error from a reply body, preferring the `detail` field
    /// the service puts on its error payloads.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| match value.get("detail") {
                Some(Value::String(text)) => Some(text.clone()),
                Some(Value::Null) | None => None,
                Some(other) => Some(other.to_string()),
            })
            .filter(|detail| !detail.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status code {status}"));
        Self::Status { status, detail }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_is_surfaced() {
        let error = ApiError::from_status(404, r#"{"detail":"Player not found"}"#);
        assert_eq!(error.to_string(), "Player not found");
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn validation_detail_is_stringified() {
        let error = ApiError::from_status(422, r#"{"detail":[{"loc":["query","q"]}]}"#);
        assert!(error.to_string().contains("query"));
    }

    #[test]
    fn falls_back_to_status_message() {
        let error = ApiError::from_status(502, "<html>bad gateway</html>");
        assert_eq!(error.to_string(), "Request failed with status code 502");
    }
}
