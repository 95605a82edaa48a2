use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Employer contribution computed for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_name": "张三",
        "avg_salary": 8000.0,
        "contribution_base": 8000.0,
        "company_fee": 1200.0
    })
)]
pub struct ContributionResult {
    pub id: u64,
    pub employee_name: String,
    pub avg_salary: f64,
    pub contribution_base: f64,
    pub company_fee: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewResult {
    #[schema(example = "张三")]
    pub employee_name: String,

    #[schema(example = 8000.0)]
    pub avg_salary: f64,

    #[schema(example = 8000.0)]
    pub contribution_base: f64,

    #[schema(example = 1200.0)]
    pub company_fee: f64,
}

impl NewResult {
    pub fn with_id(self, id: u64) -> ContributionResult {
        ContributionResult {
            id,
            employee_name: self.employee_name,
            avg_salary: self.avg_salary,
            contribution_base: self.contribution_base,
            company_fee: self.company_fee,
        }
    }
}
