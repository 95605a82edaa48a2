use crate::{
    calc::CalcError,
    excel::{export::ExportError, ingest::IngestError},
    store::StoreError,
};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::{Display, Error};
use serde_json::json;

/// Every failure a handler can return. Rendered as `{"error": "..."}`.
#[derive(Debug, Display, Error)]
pub enum ApiError {
    #[display(fmt = "no file uploaded, send it in the form field \"file\"")]
    MissingFile,

    #[display(fmt = "upload exceeds the {} byte limit", _0)]
    UploadTooLarge(#[error(not(source))] usize),

    #[display(fmt = "invalid upload: {}", _0)]
    Multipart(#[error(not(source))] String),

    #[display(fmt = "no results to export, run the calculation first")]
    NothingToExport,

    #[display(fmt = "{}", _0)]
    Ingest(IngestError),

    #[display(fmt = "{}", _0)]
    Calc(CalcError),

    #[display(fmt = "{}", _0)]
    Export(ExportError),

    #[display(fmt = "{}", _0)]
    Store(StoreError),
}

macro_rules! impl_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(impl From<$source> for ApiError {
            fn from(e: $source) -> Self {
                ApiError::$variant(e)
            }
        })*
    };
}

impl_from! {
    IngestError => Ingest,
    CalcError => Calc,
    ExportError => Export,
    StoreError => Store,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFile
            | ApiError::UploadTooLarge(_)
            | ApiError::Multipart(_)
            | ApiError::NothingToExport
            | ApiError::Calc(_) => StatusCode::BAD_REQUEST,
            ApiError::Ingest(IngestError::Workbook(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Ingest(_) => StatusCode::BAD_REQUEST,
            ApiError::Export(_) | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
