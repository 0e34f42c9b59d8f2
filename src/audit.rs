use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::{codec, db::DbPool, error::AppResult};

pub async fn log_audit(
    pool: &DbPool,
    user_id: Option<&str>,
    action: &str,
    resource: Option<&str>,
    metadata: Option<Value>,
) -> AppResult<()> {
    let metadata = metadata.as_ref().map(codec::encode).transpose()?;
    sqlx::query(
        r#"
        INSERT INTO audit_logs (id, user_id, action, resource, metadata, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(user_id)
    .bind(action)
    .bind(resource)
    .bind(metadata)
    .bind(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
    .execute(pool)
    .await?;

    Ok(())
}

/// Audit writes never fail the request they describe.
pub async fn record(
    pool: &DbPool,
    user_id: Option<&str>,
    action: &str,
    resource: &str,
    metadata: Value,
) {
    if let Err(err) = log_audit(pool, user_id, action, Some(resource), Some(metadata)).await {
        tracing::warn!(error = %err, action, "audit log failed");
    }
}
