// Intake Adapter — turns an uploaded file into decoded text and, for a
// resume, a structured profile. Isolated behind this module boundary so a
// real parsing backend can be substituted without touching the state machine.

pub mod decode;
pub mod extract;

use bytes::Bytes;

use crate::errors::AppError;
use crate::models::profile::RawResume;

/// Decodes a resume upload and builds its structured profile.
///
/// The profile is fully populated synchronously-after-decode — downstream
/// components depend on that contract, not on the extraction strategy.
pub async fn ingest_resume(filename: &str, data: Bytes) -> Result<RawResume, AppError> {
    let raw_text = decode::decode_upload(filename, data).await?;
    let profile = extract::build_profile(filename, &raw_text);
    Ok(RawResume {
        filename: filename.to_string(),
        raw_text,
        profile,
    })
}

/// Decodes a job description upload to plain text.
pub async fn ingest_job_description(filename: &str, data: Bytes) -> Result<String, AppError> {
    let text = decode::decode_upload(filename, data).await?;
    if text.trim().is_empty() {
        return Err(AppError::Decode(format!(
            "No readable text found in '{filename}'"
        )));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ingest_resume_satisfies_profile_invariant() {
        let raw = ingest_resume("jane_smith_resume.docx", Bytes::from_static(b"plain text"))
            .await
            .unwrap();
        assert!(!raw.profile.summary.is_empty());
        assert!(!raw.profile.skills.is_empty());
        assert_eq!(raw.filename, "jane_smith_resume.docx");
    }

    #[tokio::test]
    async fn test_ingest_job_description_rejects_empty_text() {
        let result = ingest_job_description("jd.txt", Bytes::from_static(b"   \n  ")).await;
        assert!(matches!(result, Err(AppError::Decode(_))));
    }

    #[tokio::test]
    async fn test_ingest_job_description_returns_decoded_text() {
        let text = ingest_job_description("jd.txt", Bytes::from_static(b"Python developer"))
            .await
            .unwrap();
        assert_eq!(text, "Python developer");
    }
}
