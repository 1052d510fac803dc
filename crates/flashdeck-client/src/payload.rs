//! Response body negotiation.

use serde_json::Value;

/// Longest error body kept for display.
const MAX_ERROR_BODY: usize = 200;

/// A response body, parsed according to its declared content type.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    /// JSON when the content type says so, opaque text otherwise.
    pub fn negotiate(content_type: Option<&str>, body: &[u8]) -> Result<Self, serde_json::Error> {
        if content_type.is_some_and(is_json) {
            if body.iter().all(u8::is_ascii_whitespace) {
                return Ok(Payload::Json(Value::Null));
            }
            Ok(Payload::Json(serde_json::from_slice(body)?))
        } else {
            Ok(Payload::Text(String::from_utf8_lossy(body).into_owned()))
        }
    }

    /// Short human-readable form, used for error display.
    pub fn summary(&self) -> Option<String> {
        let text = match self {
            Payload::Json(Value::Null) => return None,
            Payload::Json(Value::String(s)) => s.clone(),
            Payload::Json(Value::Object(map)) => match map.get("error").or_else(|| map.get("message")) {
                Some(Value::String(s)) => s.clone(),
                _ => Value::Object(map.clone()).to_string(),
            },
            Payload::Json(other) => other.to_string(),
            Payload::Text(s) => s.trim().to_string(),
        };
        if text.is_empty() {
            return None;
        }
        Some(truncate(&text, MAX_ERROR_BODY))
    }
}

fn is_json(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("application/json")
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negotiate() {
        let json = Payload::negotiate(Some("application/json; charset=utf-8"), b"[1,2]").unwrap();
        assert_eq!(json, Payload::Json(serde_json::json!([1, 2])));

        let text = Payload::negotiate(Some("text/plain"), b"[1,2]").unwrap();
        assert_eq!(text, Payload::Text("[1,2]".to_string()));

        let missing = Payload::negotiate(None, b"ok").unwrap();
        assert_eq!(missing, Payload::Text("ok".to_string()));

        assert!(Payload::negotiate(Some("application/json"), b"{oops").is_err());
        assert_eq!(
            Payload::negotiate(Some("application/json"), b"").unwrap(),
            Payload::Json(Value::Null)
        );
    }

    #[test]
    fn test_summary() {
        let err = Payload::Json(serde_json::json!({"error": "card not found"}));
        assert_eq!(err.summary().as_deref(), Some("card not found"));
        assert_eq!(Payload::Text("  \n".to_string()).summary(), None);
        assert_eq!(Payload::Json(Value::Null).summary(), None);

        let long = Payload::Text("x".repeat(500));
        assert_eq!(long.summary().unwrap().chars().count(), MAX_ERROR_BODY + 1);
    }
}
