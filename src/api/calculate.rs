use crate::{
    calc,
    config::Config,
    error::ApiError,
    models::{CalculateQuery, CalculateResponse, ErrorResponse},
    store::Store,
};
use actix_web::{HttpResponse, web};
use tracing::{error, info, warn};

/// Recompute every employee's contribution and replace the stored results
#[utoipa::path(
    post,
    path = "/api/calculate",
    params(CalculateQuery),
    responses(
        (status = 200, description = "Results recomputed", body = CalculateResponse),
        (status = 400, description = "No salaries, no cities, or unknown city", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "Calculation"
)]
pub async fn calculate(
    store: web::Data<dyn Store>,
    config: web::Data<Config>,
    query: web::Query<CalculateQuery>,
) -> Result<HttpResponse, ApiError> {
    let city = query
        .into_inner()
        .city
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| config.default_city.clone());

    let salaries = store
        .select_salaries()
        .await
        .inspect_err(|e| error!(error = %e, "Failed to load salaries"))?;
    let cities = store
        .select_cities()
        .await
        .inspect_err(|e| error!(error = %e, "Failed to load city standards"))?;

    let results = calc::calculate(&salaries, &cities, &city)
        .inspect_err(|e| warn!(error = %e, city = %city, "Calculation rejected"))?;

    store
        .replace_results(&results)
        .await
        .inspect_err(|e| error!(error = %e, "Failed to store results"))?;

    info!(
        employees = results.len(),
        salary_rows = salaries.len(),
        city = %city,
        "Calculated contributions"
    );

    Ok(HttpResponse::Ok().json(CalculateResponse {
        success: true,
        message: format!("calculated contributions for {} employees", results.len()),
        count: results.len(),
        results,
    }))
}
