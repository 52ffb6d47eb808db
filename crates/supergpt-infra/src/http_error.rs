//! Mapping of provider HTTP failures onto [`LlmError`].
//!
//! OpenAI and the OpenAI-compatible Gemini endpoint both wrap failures in an
//! `{"error": {...}}` envelope, but disagree on field types (`code` is a
//! string for OpenAI and a number for Gemini) and Gemini sometimes wraps the
//! envelope in a one-element array. Classification therefore works on the
//! normalized text of the envelope plus the HTTP status.

use serde::Deserialize;

use supergpt_types::llm::LlmError;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

// `List` must come first: serde fills a one-field struct from a sequence.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorPayload {
    List(Vec<ErrorEnvelope>),
    Single(ErrorEnvelope),
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    status: Option<String>,
}

fn parse_body(body: &str) -> ErrorBody {
    match serde_json::from_str::<ErrorPayload>(body) {
        Ok(ErrorPayload::Single(envelope)) => envelope.error,
        Ok(ErrorPayload::List(mut list)) if !list.is_empty() => list.swap_remove(0).error,
        _ => ErrorBody {
            message: body.trim().to_string(),
            ..ErrorBody::default()
        },
    }
}

/// Classify a non-success response.
pub(crate) fn classify_error(status: u16, body: &str) -> LlmError {
    let error = parse_body(body);
    let code = match &error.code {
        Some(serde_json::Value::String(s)) => s.to_ascii_lowercase(),
        _ => String::new(),
    };
    let kind = error.kind.as_deref().unwrap_or("").to_ascii_lowercase();
    let provider_status = error.status.as_deref().unwrap_or("").to_ascii_lowercase();
    let message = error.message.to_ascii_lowercase();
    let is = |needle: &str| code == needle || kind == needle;

    if is("insufficient_quota")
        || is("billing_hard_limit_reached")
        || message.contains("quota")
        || message.contains("billing")
    {
        LlmError::QuotaExceeded(error.message)
    } else if status == 401
        || status == 403
        || is("invalid_api_key")
        || is("authentication_error")
        || provider_status == "unauthenticated"
        || (message.contains("api key")
            && (message.contains("invalid")
                || message.contains("incorrect")
                || message.contains("not valid")))
    {
        LlmError::AuthenticationFailed
    } else if is("content_policy_violation")
        || is("content_filter")
        || message.contains("content policy")
        || message.contains("safety system")
    {
        LlmError::ContentPolicy(error.message)
    } else if status == 429 {
        LlmError::RateLimited {
            retry_after_ms: None,
        }
    } else if status == 408 || status == 504 {
        LlmError::Timeout
    } else if status == 400 || status == 404 || status == 422 {
        LlmError::InvalidRequest(error.message)
    } else {
        LlmError::Provider {
            message: format!("HTTP {status}: {}", error.message),
        }
    }
}

/// Classify a transport-level failure (no response received).
pub(crate) fn classify_transport(err: &reqwest::Error) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::Provider {
            message: format!("HTTP request failed: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openai_quota_error() {
        let body = r#"{"error":{"message":"You exceeded your current quota, please check your plan and billing details.","type":"insufficient_quota","param":null,"code":"insufficient_quota"}}"#;
        assert!(matches!(classify_error(429, body), LlmError::QuotaExceeded(_)));
    }

    #[test]
    fn openai_invalid_key() {
        let body = r#"{"error":{"message":"Incorrect API key provided: sk-abc.","type":"invalid_request_error","param":null,"code":"invalid_api_key"}}"#;
        assert!(matches!(classify_error(401, body), LlmError::AuthenticationFailed));
    }

    #[test]
    fn gemini_invalid_key_in_list_envelope() {
        let body = r#"[{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}]"#;
        assert!(matches!(classify_error(400, body), LlmError::AuthenticationFailed));
    }

    #[test]
    fn list_envelope_keeps_message() {
        let body = r#"[{"error":{"code":400,"message":"Request contains an invalid argument.","status":"INVALID_ARGUMENT"}}]"#;
        let error = parse_body(body);
        assert_eq!(error.message, "Request contains an invalid argument.");
        assert_eq!(error.status.as_deref(), Some("INVALID_ARGUMENT"));
        match classify_error(400, body) {
            LlmError::InvalidRequest(message) => {
                assert_eq!(message, "Request contains an invalid argument.")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn content_policy_violation() {
        let body = r#"{"error":{"message":"Your request was rejected as a result of our safety system.","type":"invalid_request_error","code":"content_policy_violation"}}"#;
        assert!(matches!(classify_error(400, body), LlmError::ContentPolicy(_)));
    }

    #[test]
    fn plain_rate_limit() {
        let body = r#"{"error":{"message":"Rate limit reached","type":"requests","code":"rate_limit_exceeded"}}"#;
        assert!(matches!(classify_error(429, body), LlmError::RateLimited { .. }));
    }

    #[test]
    fn non_json_body_is_provider_error() {
        match classify_error(502, "<html>Bad Gateway</html>") {
            LlmError::Provider { message } => assert!(message.contains("502")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn bad_request_without_markers() {
        let body = r#"{"error":{"message":"Unknown model","type":"invalid_request_error"}}"#;
        assert!(matches!(classify_error(404, body), LlmError::InvalidRequest(_)));
    }
}
