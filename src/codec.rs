//! JSON-in-TEXT columns (`products.specs`, `orders.items`, `audit_logs.metadata`).
//!
//! Values are encoded right before a write and decoded right after a read, so
//! raw JSON text never travels past the persistence layer.

use serde::{Serialize, de::DeserializeOwned};

use crate::error::AppResult;

pub fn encode<T: Serialize + ?Sized>(value: &T) -> AppResult<String> {
    Ok(serde_json::to_string(value)?)
}

pub fn decode<T: DeserializeOwned>(raw: &str) -> AppResult<T> {
    Ok(serde_json::from_str(raw)?)
}
