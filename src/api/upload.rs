use crate::{
    config::Config,
    error::ApiError,
    excel::ingest::{check_extension, parse_cities, parse_salaries},
    models::{ErrorResponse, UploadForm, UploadResponse},
    store::Store,
    utils::multipart::read_file_field,
};
use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use tracing::{error, info};

/// Replace all city standards with the rows of an uploaded workbook
#[utoipa::path(
    post,
    path = "/api/upload/cities",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "City standards imported", body = UploadResponse),
        (status = 400, description = "Missing, unsupported or empty file", body = ErrorResponse),
        (status = 500, description = "Workbook unreadable or store failure", body = ErrorResponse)
    ),
    tag = "Upload"
)]
pub async fn upload_cities(
    store: web::Data<dyn Store>,
    config: web::Data<Config>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let file = read_file_field(payload, config.max_upload_bytes).await?;
    check_extension(&file.filename)?;

    let cities = parse_cities(file.bytes)?;
    store
        .replace_cities(&cities)
        .await
        .inspect_err(|e| error!(error = %e, "Failed to store city standards"))?;

    info!(count = cities.len(), filename = %file.filename, "Imported city standards");

    Ok(HttpResponse::Ok().json(UploadResponse {
        success: true,
        message: format!("imported {} city standard records", cities.len()),
        count: cities.len(),
    }))
}

/// Replace all salary records with the rows of an uploaded workbook
#[utoipa::path(
    post,
    path = "/api/upload/salaries",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Salaries imported", body = UploadResponse),
        (status = 400, description = "Missing, unsupported or empty file", body = ErrorResponse),
        (status = 500, description = "Workbook unreadable or store failure", body = ErrorResponse)
    ),
    tag = "Upload"
)]
pub async fn upload_salaries(
    store: web::Data<dyn Store>,
    config: web::Data<Config>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let file = read_file_field(payload, config.max_upload_bytes).await?;
    check_extension(&file.filename)?;

    let salaries = parse_salaries(file.bytes)?;
    store
        .replace_salaries(&salaries)
        .await
        .inspect_err(|e| error!(error = %e, "Failed to store salaries"))?;

    info!(count = salaries.len(), filename = %file.filename, "Imported salaries");

    Ok(HttpResponse::Ok().json(UploadResponse {
        success: true,
        message: format!("imported {} salary records", salaries.len()),
        count: salaries.len(),
    }))
}
