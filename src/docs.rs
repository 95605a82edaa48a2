use crate::model::{city::City, result::ContributionResult, result::NewResult, salary::Salary};
use crate::models::{
    CalculateQuery, CalculateResponse, ErrorResponse, ResultsResponse, UploadForm, UploadResponse,
};
use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiDoc;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Social Insurance Contribution API",
        version = "1.0.0",
        description = r#"
## Employer contribution calculator ("five insurances and one fund")

### 🔹 Workflow
1. **Upload city standards** — `city_name`, `year`, `base_min`, `base_max`, `rate`
2. **Upload monthly salaries** — `employee_id`, `employee_name`, `month`, `salary_amount`
3. **Calculate** — each employee's average salary is clamped into the city's
   `[base_min, base_max]` range and multiplied by `rate`
4. **View or export** the stored results

Every upload replaces its whole collection; every calculation replaces the
whole result set. Spreadsheet headers may also be given in Chinese
(`城市名`, `基数下限`, `员工姓名`, `工资金额`, ...).

### 📦 Response Format
- JSON bodies with `success: true` on success
- `{ "error": "..." }` with a 4xx/5xx status on failure

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::upload::upload_cities,
        crate::api::upload::upload_salaries,

        crate::api::calculate::calculate,

        crate::api::results::list_results,
        crate::api::results::export
    ),
    components(
        schemas(
            City,
            Salary,
            ContributionResult,
            NewResult,
            UploadForm,
            UploadResponse,
            CalculateQuery,
            CalculateResponse,
            ResultsResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "Upload", description = "Spreadsheet import APIs"),
        (name = "Calculation", description = "Contribution calculation APIs"),
        (name = "Results", description = "Result listing and export APIs"),
    )
)]
pub struct ApiDoc;

/// Paths in `ApiDoc` are declared under `/api`; this moves them under the
/// configured `API_PREFIX` so Swagger UI calls the routes actually served.
pub fn openapi_for(prefix: &str) -> OpenApiDoc {
    let mut doc = ApiDoc::openapi();
    let prefix = prefix.trim_end_matches('/');
    doc.paths.paths = std::mem::take(&mut doc.paths.paths)
        .into_iter()
        .map(|(path, item)| match path.strip_prefix("/api") {
            Some(rest) => (format!("{prefix}{rest}"), item),
            None => (path, item),
        })
        .collect();
    doc
}
