use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const SUCCESS: &str = "success";

/// `{"status": "success"}` acknowledgement for writes that return nothing else.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: SUCCESS.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CreatedResponse {
    pub status: String,
    pub id: String,
}

impl CreatedResponse {
    pub fn success(id: impl Into<String>) -> Self {
        Self {
            status: SUCCESS.to_string(),
            id: id.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct MessageResponse {
    pub status: String,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: SUCCESS.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
    pub code: String,
}
