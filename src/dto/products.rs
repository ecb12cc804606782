use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Product;

fn default_available() -> bool {
    true
}

/// Prices are in cents.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    pub category_id: i32,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub price: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock_quantity: i32,
    #[validate(url)]
    pub image_url: Option<String>,
    #[validate(range(min = 0.0))]
    pub weight: Option<f64>,
    #[validate(length(max = 100))]
    pub dimensions: Option<String>,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    pub category_id: Option<i32>,
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    #[validate(range(min = 0))]
    pub stock_quantity: Option<i32>,
    #[validate(url)]
    pub image_url: Option<String>,
    #[validate(range(min = 0.0))]
    pub weight: Option<f64>,
    #[validate(length(max = 100))]
    pub dimensions: Option<String>,
    pub is_available: Option<bool>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CreateProductRequest {
        CreateProductRequest {
            category_id: 1,
            name: "USB-C Hub".into(),
            description: None,
            price: 2999,
            stock_quantity: 4,
            image_url: Some("https://cdn.example.com/hub.png".into()),
            weight: Some(0.2),
            dimensions: None,
            is_available: true,
        }
    }

    #[test]
    fn accepts_well_formed_product() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn rejects_negative_price_and_blank_name() {
        let mut req = valid();
        req.price = -1;
        req.name = String::new();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("name"));
    }

    #[test]
    fn rejects_malformed_image_url() {
        let mut req = valid();
        req.image_url = Some("not a url".into());
        assert!(req.validate().is_err());
    }

    #[test]
    fn empty_patch_is_valid() {
        assert!(UpdateProductRequest::default().validate().is_ok());
    }
}
