use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAddressRequest {
    pub user_id: i32,
    pub country: String,
    pub city: String,
    pub street: String,
    pub house_number: String,
    pub apartment: Option<String>,
    pub postal_code: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateAddressRequest {
    pub country: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub apartment: Option<String>,
    pub postal_code: Option<String>,
    pub is_default: Option<bool>,
}
