use crate::catalog::Catalog;
use crate::config::VisionSettings;
use crate::errors::IdentifyError;
use crate::rng::{RandomSource, ThreadRandom};
use crate::vision::fallback::FallbackGenerator;
use crate::vision::ids::next_record_id;
use crate::vision::transport::{AnalysisResponse, HttpTransport, VisionTransport};
use crate::vision::{IdentificationResult, ImageRef, IDENTIFIED_EMOJI};
use schema::CreatureRecord;
use std::time::Duration;
use tracing::{info, warn};

/// Keys the client owns on a record; the service cannot override them.
const RESERVED_KEYS: [&str; 3] = ["id", "emoji", "image"];

/// Resolves a captured image to a creature record.
///
/// `identify` is total: every call yields exactly one record. Any failure
/// (unreadable image, unreachable endpoint, non-2xx status, malformed body)
/// is logged and replaced by an offline record built from the local catalog.
/// The network call is never retried.
pub struct IdentificationClient<T = HttpTransport, R = ThreadRandom> {
    transport: T,
    fallback: FallbackGenerator<R>,
    fallback_delay: Duration,
}

impl IdentificationClient<HttpTransport, ThreadRandom> {
    pub fn from_settings(settings: &VisionSettings) -> reqwest::Result<Self> {
        let transport = HttpTransport::from_settings(settings)?;
        Ok(Self::new(transport, FallbackGenerator::with_bundled_catalog())
            .with_fallback_delay(settings.fallback_delay()))
    }
}

impl<T: VisionTransport, R: RandomSource> IdentificationClient<T, R> {
    pub fn new(transport: T, fallback: FallbackGenerator<R>) -> Self {
        Self {
            transport,
            fallback,
            fallback_delay: Duration::ZERO,
        }
    }

    pub fn with_catalog(transport: T, catalog: Catalog, rng: R) -> Self {
        Self::new(transport, FallbackGenerator::new(catalog, rng))
    }

    /// Pacing delay before a fallback record is handed back. Zero disables it.
    pub fn with_fallback_delay(mut self, delay: Duration) -> Self {
        self.fallback_delay = delay;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn identify(&self, image: &ImageRef) -> IdentificationResult {
        match self.request(image).await {
            Ok(response) => {
                info!(name = %response.name, rarity = %response.rarity, "backend identified capture");
                IdentificationResult::Success(self.identified_record(image, response))
            }
            Err(cause) => {
                warn!(
                    kind = ?cause.kind(),
                    endpoint = self.transport.endpoint(),
                    "identification failed, falling back to local catalog: {}",
                    cause
                );
                if !self.fallback_delay.is_zero() {
                    tokio::time::sleep(self.fallback_delay).await;
                }
                let record = self.fallback.generate(image, next_record_id());
                IdentificationResult::Fallback { record, cause }
            }
        }
    }

    async fn request(&self, image: &ImageRef) -> Result<AnalysisResponse, IdentifyError> {
        let path = image.to_path()?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| IdentifyError::ImageRead {
                path: path.clone(),
                source,
            })?;
        info!(endpoint = self.transport.endpoint(), bytes = bytes.len(), "uploading capture");
        self.transport.analyze(bytes).await
    }

    fn identified_record(&self, image: &ImageRef, response: AnalysisResponse) -> CreatureRecord {
        let mut extra = response.extra;
        for key in RESERVED_KEYS {
            extra.remove(key);
        }

        CreatureRecord {
            id: next_record_id(),
            name: response.name,
            scientific_name: response.scientific_name,
            species: response.species,
            rarity: response.rarity,
            stats: response.stats,
            emoji: IDENTIFIED_EMOJI.to_string(),
            image: image.as_str().to_string(),
            description: response.description,
            extra,
        }
    }
}
