use serde::Deserialize;

/// Every field is required; a missing key rejects the request.
#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: i64,
}
