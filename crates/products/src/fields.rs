//! Wire names of the multipart fields.

use serde::{Deserialize, Serialize};

/// Names used for each part of the create-product request.
///
/// The defaults match the Product API contract. Deployments whose backend
/// expects other names override individual entries; missing entries keep
/// their default when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldNames {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category_id: String,
    pub image: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            name: "name".to_string(),
            description: "description".to_string(),
            price: "price".to_string(),
            category_id: "categoryId".to_string(),
            image: "image".to_string(),
        }
    }
}
