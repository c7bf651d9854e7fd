//! Image ingestion pipeline
//!
//! ```text
//! SourceAsset ──► resolve orientation (once)
//!             ──► render every width (blocking pool, concurrently)
//!             ──► name + upload every derivative (concurrently)
//!             ──► StoredAsset per width, in request order
//! ```
//!
//! Either every requested width ends up stored or the call fails. Rendering
//! finishes for all widths before the first upload starts, so a corrupt
//! source never reaches storage. If some uploads fail (or the caller
//! cancels) the derivatives that did land are deleted again.

mod asset;
mod error;

pub use asset::{SourceAsset, StoredAsset};
pub use error::PipelineError;

use bytes::Bytes;
use futures::future::{join_all, try_join_all};
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::StorageConfig;
use crate::imaging::{orientation, renderer, ImageSettings, RenderParams, RenderedImage, RotationSpec};
use crate::metrics::PipelineMetrics;
use crate::naming;
use crate::storage::{BlobUploader, StorageError};

#[derive(Debug, Clone)]
pub struct ImagePipeline {
    uploader: Option<BlobUploader>,
}

impl ImagePipeline {
    pub fn new(uploader: BlobUploader) -> Self {
        Self {
            uploader: Some(uploader),
        }
    }

    /// A pipeline without storage; every save fails with `NotConfigured`
    pub fn unconfigured() -> Self {
        Self { uploader: None }
    }

    pub async fn from_config(config: Option<&StorageConfig>) -> Result<Self, StorageError> {
        match config {
            Some(storage) => Ok(Self::new(BlobUploader::from_config(storage).await?)),
            None => Ok(Self::unconfigured()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.uploader.is_some()
    }

    fn uploader(&self) -> Result<&BlobUploader, PipelineError> {
        self.uploader
            .as_ref()
            .ok_or(PipelineError::Storage(StorageError::NotConfigured))
    }

    /// Store a file as-is under a fresh key
    pub async fn save_file(
        &self,
        container: &str,
        file: SourceAsset,
    ) -> Result<StoredAsset, PipelineError> {
        let uploader = self.uploader()?;
        let key = naming::make_key(file.file_name(), None);

        let uri = uploader
            .upload(container, &key, file.bytes().clone(), file.content_type())
            .await?;

        tracing::info!(container, key = %key, bytes = file.len(), "Saved file");
        Ok(StoredAsset { uri, key })
    }

    /// Render and store one derivative per configured width
    ///
    /// Results are in the same order as `settings.widths`.
    pub async fn save_image(
        &self,
        container: &str,
        file: SourceAsset,
        settings: &ImageSettings,
    ) -> Result<Vec<StoredAsset>, PipelineError> {
        self.save_image_with_cancellation(container, file, settings, &CancellationToken::new())
            .await
    }

    /// Like [`save_image`](Self::save_image), aborting when `token` is cancelled
    ///
    /// On cancellation no derivative of this call is left in storage.
    pub async fn save_image_with_cancellation(
        &self,
        container: &str,
        file: SourceAsset,
        settings: &ImageSettings,
        token: &CancellationToken,
    ) -> Result<Vec<StoredAsset>, PipelineError> {
        let uploader = self.uploader()?;
        settings.validate()?;
        if settings.widths.is_empty() {
            return Ok(Vec::new());
        }

        let started = Instant::now();
        let rotation = orientation::resolve(file.bytes());
        tracing::debug!(
            file_name = file.file_name(),
            widths = ?settings.widths,
            rotation = ?rotation,
            "Rendering derivatives"
        );

        let renders = settings
            .widths
            .iter()
            .map(|&width| render_one(file.bytes().clone(), settings.render_params(width), rotation));

        let rendered = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(PipelineError::Cancelled),
            rendered = try_join_all(renders) => rendered?,
        };

        let uploads = rendered
            .into_iter()
            .zip(&settings.widths)
            .map(|(image, &width)| {
                let key = naming::make_key(file.file_name(), Some(width));
                upload_one(uploader, container, key, image, token)
            });
        let results = join_all(uploads).await;

        let stored = settle(uploader, container, results, token).await?;
        tracing::info!(
            container,
            file_name = file.file_name(),
            derivatives = stored.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Saved image derivatives"
        );
        Ok(stored)
    }

    /// Delete `key` from `container`
    ///
    /// An absent or blank key is a successful no-op and never touches storage.
    pub async fn delete_file(
        &self,
        container: &str,
        key: Option<&str>,
    ) -> Result<(), PipelineError> {
        let key = match key {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Ok(()),
        };

        self.uploader()?.delete(container, key).await?;
        tracing::info!(container, key, "Deleted file");
        Ok(())
    }
}

async fn render_one(
    source: Bytes,
    params: RenderParams,
    rotation: RotationSpec,
) -> Result<RenderedImage, PipelineError> {
    let rendered = tokio::task::spawn_blocking(move || {
        let started = Instant::now();
        renderer::render(&source, &params, rotation).map(|image| (image, started.elapsed()))
    })
    .await??;

    let (image, elapsed) = rendered;
    PipelineMetrics::global().record_render(image.format.as_str(), elapsed);
    tracing::debug!(
        width = params.width,
        output_width = image.width,
        output_height = image.height,
        bytes = image.data.len(),
        "Rendered derivative"
    );
    Ok(image)
}

async fn upload_one(
    uploader: &BlobUploader,
    container: &str,
    key: String,
    image: RenderedImage,
    token: &CancellationToken,
) -> (String, Result<http::Uri, PipelineError>) {
    let content_type = image.content_type();
    let body = Bytes::from(image.data);

    let result = tokio::select! {
        biased;
        _ = token.cancelled() => Err(PipelineError::Cancelled),
        uploaded = uploader.upload(container, &key, body, content_type) => uploaded.map_err(PipelineError::from),
    };
    (key, result)
}

/// Turn per-width upload outcomes into the final result
///
/// All succeeded: the stored assets in order. Otherwise every attempted key is
/// deleted (best effort, a missing object deletes fine) and the first failure
/// is returned, or `Cancelled` if the token fired. A cancelled upload may
/// already have reached the store, so it is removed as well.
async fn settle(
    uploader: &BlobUploader,
    container: &str,
    results: Vec<(String, Result<http::Uri, PipelineError>)>,
    token: &CancellationToken,
) -> Result<Vec<StoredAsset>, PipelineError> {
    if results.iter().all(|(_, result)| result.is_ok()) && !token.is_cancelled() {
        return Ok(results
            .into_iter()
            .filter_map(|(key, result)| result.ok().map(|uri| StoredAsset { uri, key }))
            .collect());
    }

    let mut first_error = None;
    let mut attempted = Vec::with_capacity(results.len());
    for (key, result) in results {
        if let Err(e) = result {
            first_error.get_or_insert(e);
        }
        attempted.push(key);
    }

    tracing::warn!(
        container,
        rollback = attempted.len(),
        "Derivative upload incomplete, removing attempted derivatives"
    );
    for key in &attempted {
        if let Err(e) = uploader.delete(container, key).await {
            tracing::warn!(container, key = %key, error = %e, "Failed to remove derivative");
        }
    }

    if token.is_cancelled() {
        return Err(PipelineError::Cancelled);
    }
    Err(first_error.unwrap_or(PipelineError::Cancelled))
}
