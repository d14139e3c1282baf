//! File decode. PDFs go through `pdf-extract` on a blocking thread; every
//! other accepted format is decoded as lossy UTF-8 text.
//!
//! No client-side size or type validation happens before decode — an
//! unreadable file surfaces as a `Decode` error and nothing transitions.

use anyhow::anyhow;
use bytes::Bytes;

use crate::errors::AppError;

fn is_pdf(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
}

pub async fn decode_upload(filename: &str, data: Bytes) -> Result<String, AppError> {
    if is_pdf(filename) {
        let name = filename.to_string();
        // pdf-extract is CPU-bound; keep it off the async runtime threads.
        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&data)
                .map_err(|e| AppError::Decode(format!("Could not read '{name}': {e}")))
        })
        .await
        .map_err(|e| AppError::Internal(anyhow!("decode task panicked: {e}")))??;

        if text.trim().is_empty() {
            return Err(AppError::Decode(format!(
                "No extractable text in '{filename}'"
            )));
        }
        Ok(text)
    } else {
        Ok(String::from_utf8_lossy(&data).into_owned())
    }
}
