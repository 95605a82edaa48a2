use crate::error::ApiError;
use actix_multipart::Multipart;
use futures_util::StreamExt;
use tracing::debug;

/// Form field carrying the spreadsheet.
pub const FILE_FIELD: &str = "file";

pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Buffers the `file` field of a multipart body, draining any others.
pub async fn read_file_field(
    mut payload: Multipart,
    max_bytes: usize,
) -> Result<UploadedFile, ApiError> {
    let mut upload: Option<UploadedFile> = None;

    while let Some(field) = payload.next().await {
        let mut field = field.map_err(|e| ApiError::Multipart(e.to_string()))?;

        let (name, filename) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().map(str::to_string),
                cd.get_filename().map(str::to_string),
            ),
            None => (None, None),
        };
        let wanted = upload.is_none() && name.as_deref() == Some(FILE_FIELD);

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| ApiError::Multipart(e.to_string()))?;
            if !wanted {
                continue;
            }
            if bytes.len() + chunk.len() > max_bytes {
                return Err(ApiError::UploadTooLarge(max_bytes));
            }
            bytes.extend_from_slice(&chunk);
        }

        if wanted {
            debug!(filename = ?filename, size = bytes.len(), "Received upload");
            upload = Some(UploadedFile {
                filename: filename.unwrap_or_default(),
                bytes,
            });
        }
    }

    upload.ok_or(ApiError::MissingFile)
}
