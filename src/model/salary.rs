use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Salary {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "E001")]
    pub employee_id: String,

    #[schema(example = "张三")]
    pub employee_name: String,

    #[schema(example = "202401")]
    pub month: String,

    #[schema(example = 8000.0)]
    pub salary_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewSalary {
    pub employee_id: String,
    pub employee_name: String,
    pub month: String,
    pub salary_amount: f64,
}

impl NewSalary {
    pub fn with_id(self, id: u64) -> Salary {
        Salary {
            id,
            employee_id: self.employee_id,
            employee_name: self.employee_name,
            month: self.month,
            salary_amount: self.salary_amount,
        }
    }
}
