use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 255, code = "validation.required"))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InstitutionRequest {
    #[validate(length(min = 1, max = 255, code = "validation.required"))]
    pub name: String,

    #[validate(length(min = 1, code = "validation.required"))]
    pub description: String,
}
