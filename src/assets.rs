//! External asset host client
//!
//! Delegates file uploads to a Cloudinary-style upload API. MIME and size
//! checks run before any bytes leave the process; upstream failures are
//! surfaced as a generic internal error with no retry.

use crate::config::AssetConfig;
use crate::error::AppError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
const MAX_PDF_BYTES: usize = 10 * 1024 * 1024;

/// What kind of asset is being uploaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Image,
    Pdf,
}

impl UploadKind {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "image" => Ok(UploadKind::Image),
            "pdf" => Ok(UploadKind::Pdf),
            _ => Err(AppError::Validation(
                "Upload type must be one of: image, pdf".to_string(),
            )),
        }
    }

    pub fn max_bytes(self) -> usize {
        match self {
            UploadKind::Image => MAX_IMAGE_BYTES,
            UploadKind::Pdf => MAX_PDF_BYTES,
        }
    }

    /// Exactly application/pdf for pdf; any image/* for image
    pub fn accepts(self, content_type: &str) -> bool {
        match self {
            UploadKind::Image => content_type.starts_with("image/"),
            UploadKind::Pdf => content_type == "application/pdf",
        }
    }

    /// Storage mode on the asset host. PDFs go up as `raw` so the binary
    /// is preserved verbatim instead of being run through image pipelines.
    pub fn resource_type(self) -> &'static str {
        match self {
            UploadKind::Image => "image",
            UploadKind::Pdf => "raw",
        }
    }

    fn subfolder(self) -> &'static str {
        match self {
            UploadKind::Image => "images",
            UploadKind::Pdf => "documents",
        }
    }
}

/// Validate MIME type and size before anything is forwarded upstream
pub fn check_upload(kind: UploadKind, content_type: &str, size: usize) -> Result<(), AppError> {
    if !kind.accepts(content_type) {
        let msg = match kind {
            UploadKind::Image => "File must be an image",
            UploadKind::Pdf => "File must be a PDF document",
        };
        return Err(AppError::Validation(msg.to_string()));
    }
    if size > kind.max_bytes() {
        let msg = match kind {
            UploadKind::Image => "Image must be 5MB or smaller",
            UploadKind::Pdf => "PDF must be 10MB or smaller",
        };
        return Err(AppError::Validation(msg.to_string()));
    }
    Ok(())
}

/// Result of a successful upload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedAsset {
    pub url: String,
    pub public_id: String,
    pub file_name: String,
}

#[derive(Debug, Deserialize)]
struct UploadApiResponse {
    secure_url: String,
    public_id: String,
}

/// Client for the external asset-hosting service
#[derive(Clone)]
pub struct AssetClient {
    http: reqwest::Client,
    api_base: String,
    cloud_name: String,
    upload_preset: String,
    folder: String,
}

impl AssetClient {
    pub fn new(config: &AssetConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            cloud_name: config.cloud_name.clone(),
            upload_preset: config.upload_preset.clone(),
            folder: config.folder.clone(),
        }
    }

    /// Encode and forward a file to the asset host.
    ///
    /// Callers must have run `check_upload` first. PDFs get a
    /// timestamp-derived name with a forced `.pdf` extension so repeated
    /// notice uploads never collide; images keep their client file name.
    pub async fn upload(
        &self,
        bytes: &[u8],
        content_type: &str,
        kind: UploadKind,
        original_name: Option<&str>,
    ) -> Result<UploadedAsset, AppError> {
        let data_uri = format!("data:{};base64,{}", content_type, BASE64.encode(bytes));
        let folder = format!("{}/{}", self.folder, kind.subfolder());

        let mut body = json!({
            "file": data_uri,
            "upload_preset": self.upload_preset,
            "folder": folder,
        });

        let file_name = match kind {
            UploadKind::Pdf => {
                let name = format!("notice-{}.pdf", Utc::now().timestamp_millis());
                body["public_id"] = json!(name);
                name
            }
            UploadKind::Image => original_name.unwrap_or("image").to_string(),
        };

        let url = format!(
            "{}/{}/{}/upload",
            self.api_base,
            self.cloud_name,
            kind.resource_type()
        );
        debug!("Forwarding {} byte {} upload to asset host", bytes.len(), kind.resource_type());

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Asset host unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "Asset host returned {}",
                response.status()
            )));
        }

        let parsed: UploadApiResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Malformed asset host response: {}", e)))?;

        info!("Uploaded asset {} ({})", parsed.public_id, kind.resource_type());

        Ok(UploadedAsset {
            url: parsed.secure_url,
            public_id: parsed.public_id,
            file_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn message_of(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn pdf_requires_exact_mime() {
        assert!(UploadKind::Pdf.accepts("application/pdf"));
        assert!(!UploadKind::Pdf.accepts("application/x-pdf"));
        assert!(!UploadKind::Pdf.accepts("image/png"));
    }

    #[test]
    fn image_accepts_any_image_subtype() {
        assert!(UploadKind::Image.accepts("image/png"));
        assert!(UploadKind::Image.accepts("image/webp"));
        assert!(!UploadKind::Image.accepts("application/pdf"));
    }

    #[test]
    fn oversized_image_is_rejected_locally() {
        // 6MB image, over the 5MB ceiling; no client is even constructed.
        let err = check_upload(UploadKind::Image, "image/jpeg", 6 * 1024 * 1024).unwrap_err();
        assert_eq!(message_of(err), "Image must be 5MB or smaller");
    }

    #[test]
    fn pdf_ceiling_is_ten_megabytes() {
        assert!(check_upload(UploadKind::Pdf, "application/pdf", MAX_PDF_BYTES).is_ok());
        assert!(check_upload(UploadKind::Pdf, "application/pdf", MAX_PDF_BYTES + 1).is_err());
    }

    #[test]
    fn mime_check_precedes_size_check() {
        let err = check_upload(UploadKind::Pdf, "image/png", 20 * 1024 * 1024).unwrap_err();
        assert_eq!(message_of(err), "File must be a PDF document");
    }

    #[test]
    fn unknown_upload_kind_is_rejected() {
        assert!(UploadKind::parse("video").is_err());
        assert_eq!(UploadKind::parse("pdf").unwrap(), UploadKind::Pdf);
    }
}
