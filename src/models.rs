use crate::model::result::{ContributionResult, NewResult};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Multipart form accepted by both upload endpoints.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "imported 12 salary records")]
    pub message: String,
    #[schema(example = 12)]
    pub count: usize,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct CalculateQuery {
    /// City whose standard applies; the configured default when omitted.
    #[schema(example = "佛山")]
    pub city: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CalculateResponse {
    pub success: bool,
    #[schema(example = "calculated contributions for 3 employees")]
    pub message: String,
    pub count: usize,
    pub results: Vec<NewResult>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResultsResponse {
    pub success: bool,
    pub data: Vec<ContributionResult>,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "no salary data, upload employee salaries first")]
    pub error: String,
}
