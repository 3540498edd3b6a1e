use crate::config::VisionSettings;
use crate::errors::IdentifyError;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use schema::{CreatureStats, Rarity};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

/// Multipart field the capture is uploaded under.
pub const UPLOAD_FIELD: &str = "image";
pub const UPLOAD_FILE_NAME: &str = "capture.jpg";
pub const UPLOAD_MIME: &str = "image/jpeg";

/// Body of a successful classification response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub name: String,
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    pub rarity: Rarity,
    pub stats: CreatureStats,
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, IdentifyError> {
        serde_json::from_slice(body).map_err(|e| IdentifyError::Decode(e.to_string()))
    }
}

/// Something that can classify image bytes.
#[async_trait]
pub trait VisionTransport: Send + Sync {
    async fn analyze(&self, image: Vec<u8>) -> Result<AnalysisResponse, IdentifyError>;

    /// Where requests go, for log lines.
    fn endpoint(&self) -> &str;
}

/// Uploads captures to the classification server over HTTP.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_settings(settings: &VisionSettings) -> reqwest::Result<Self> {
        Self::new(settings.endpoint.clone(), settings.timeout())
    }

    fn form(image: Vec<u8>) -> Result<Form, IdentifyError> {
        let part = Part::bytes(image)
            .file_name(UPLOAD_FILE_NAME)
            .mime_str(UPLOAD_MIME)
            .map_err(|e| IdentifyError::Network(e.to_string()))?;
        Ok(Form::new().part(UPLOAD_FIELD, part))
    }
}

#[async_trait]
impl VisionTransport for HttpTransport {
    async fn analyze(&self, image: Vec<u8>) -> Result<AnalysisResponse, IdentifyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(Self::form(image)?)
            .send()
            .await
            .map_err(|e| IdentifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IdentifyError::Protocol {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| IdentifyError::Network(e.to_string()))?;
        AnalysisResponse::from_slice(&body)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
