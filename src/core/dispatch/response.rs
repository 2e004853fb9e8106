//! Response envelopes and their status semantics.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::DispatchError;
use crate::core::capability::DescriptorView;

/// Outward class of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    NotFound,
    BadRequest,
    HandlerError,
}

impl StatusClass {
    /// HTTP status for this class.
    ///
    /// A handler error is a semantic failure, not a transport one: it is
    /// delivered as 200 with the error body.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::BadRequest => 400,
            Self::HandlerError => 200,
        }
    }

    /// JSON-RPC error code for this class.
    pub fn jsonrpc_code(&self) -> i32 {
        match self {
            Self::NotFound => -32002,
            Self::BadRequest => -32602,
            Self::HandlerError => -32603,
        }
    }
}

/// Body of a failure envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status_class: StatusClass,
    pub message: String,
}

/// The envelope every request resolves to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    /// Discovery listing.
    Discovery { descriptors: Vec<DescriptorView> },

    /// Handler return value.
    Success { result: Value },

    /// Tagged failure.
    Failure { error: ErrorBody },
}

impl Response {
    /// The failure class, if this envelope is a failure.
    pub fn status_class(&self) -> Option<StatusClass> {
        match self {
            Self::Failure { error } => Some(error.status_class),
            _ => None,
        }
    }

    /// HTTP status code for this envelope.
    pub fn http_status(&self) -> u16 {
        self.status_class().map_or(200, |class| class.http_status())
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failure { .. })
    }

    /// The handler result, for success envelopes.
    pub fn result(&self) -> Option<&Value> {
        match self {
            Self::Success { result } => Some(result),
            _ => None,
        }
    }
}

impl From<DispatchError> for Response {
    fn from(err: DispatchError) -> Self {
        Self::Failure {
            error: ErrorBody {
                status_class: err.status_class(),
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::capability::{CapabilityKind, HandlerError};
    use serde_json::json;

    #[test]
    fn test_http_status_mapping() {
        let not_found = Response::from(DispatchError::not_found(CapabilityKind::Tool, "nope"));
        let bad = Response::from(DispatchError::UnknownVerb("delete".into()));
        let handler = Response::from(DispatchError::from(HandlerError::new("boom")));
        let ok = Response::Success { result: json!(1) };

        assert_eq!(not_found.http_status(), 404);
        assert_eq!(bad.http_status(), 400);
        assert_eq!(handler.http_status(), 200);
        assert_eq!(ok.http_status(), 200);
        assert!(!handler.is_success());
    }

    #[test]
    fn test_failure_wire_shape() {
        let response = Response::from(DispatchError::from(HandlerError::new("boom")));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "error": { "status_class": "handler_error", "message": "boom" } })
        );
    }

    #[test]
    fn test_success_wire_shape() {
        let response = Response::Success {
            result: json!(["Board Room"]),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "result": ["Board Room"] })
        );
    }
}
