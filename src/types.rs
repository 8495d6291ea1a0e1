use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Inbound invocation envelope. Accepted for shape compatibility; the
/// publish flow does not read it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Request {
    pub http_method: Option<String>,
    pub path: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub body: String,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Response {
            status_code: 200,
            body: body.into(),
        }
    }

    pub fn internal_error(body: impl Into<String>) -> Self {
        Response {
            status_code: 500,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_serializes_gateway_shape() {
        let json = serde_json::to_string(&Response::ok("Message sent: ok")).unwrap();
        assert_eq!(json, r#"{"statusCode":200,"body":"Message sent: ok"}"#);
    }

    #[test]
    fn only_2xx_counts_as_success() {
        assert!(Response::ok("Message sent: ok").is_success());
        assert!(!Response::internal_error("Broker error: bad login").is_success());
    }

    #[test]
    fn request_tolerates_missing_fields() {
        let req: Request = serde_json::from_str(r#"{"httpMethod":"POST"}"#).unwrap();
        assert_eq!(req.http_method.as_deref(), Some("POST"));
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }
}
