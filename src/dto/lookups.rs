//! Payloads shared by the two name/description lookup tables:
//! order statuses and payment methods.

use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateLookupRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateLookupRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}
