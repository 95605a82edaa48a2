use crate::{
    error::ApiError,
    excel::export::{EXPORT_FILENAME, export_results},
    models::{ErrorResponse, ResultsResponse},
    store::Store,
};
use actix_web::{
    HttpResponse,
    http::header::{
        Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue,
    },
    web,
};
use tracing::{error, info};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// List stored results, ordered by employee name
#[utoipa::path(
    get,
    path = "/api/results",
    responses(
        (status = 200, body = ResultsResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "Results"
)]
pub async fn list_results(store: web::Data<dyn Store>) -> Result<HttpResponse, ApiError> {
    let data = store
        .select_results()
        .await
        .inspect_err(|e| error!(error = %e, "Failed to fetch results"))?;

    Ok(HttpResponse::Ok().json(ResultsResponse {
        success: true,
        data,
    }))
}

/// Download stored results as an Excel workbook
#[utoipa::path(
    get,
    path = "/api/results/export",
    responses(
        (status = 200, description = "xlsx workbook attachment"),
        (status = 400, description = "Nothing calculated yet", body = ErrorResponse),
        (status = 500, description = "Store or export failure", body = ErrorResponse)
    ),
    tag = "Results"
)]
pub async fn export(store: web::Data<dyn Store>) -> Result<HttpResponse, ApiError> {
    let results = store
        .select_results()
        .await
        .inspect_err(|e| error!(error = %e, "Failed to fetch results"))?;
    if results.is_empty() {
        return Err(ApiError::NothingToExport);
    }

    let bytes = export_results(&results)?;
    info!(rows = results.len(), size = bytes.len(), "Exported results");

    Ok(HttpResponse::Ok()
        .content_type(XLSX_CONTENT_TYPE)
        .insert_header(attachment(EXPORT_FILENAME))
        .body(bytes))
}

/// Attachment header with an RFC 5987 UTF-8 name plus an ASCII fallback.
fn attachment(filename: &str) -> ContentDisposition {
    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![
            DispositionParam::Filename("results.xlsx".to_string()),
            DispositionParam::FilenameExt(ExtendedValue {
                charset: Charset::Ext("UTF-8".to_string()),
                language_tag: None,
                value: filename.as_bytes().to_vec(),
            }),
        ],
    }
}
