use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Any client-sent `date` is ignored; reviews are stamped by the server.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateReviewRequest {
    #[validate(length(min = 1, message = "user_id must not be empty"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "user_name must not be empty"))]
    pub user_name: String,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}
