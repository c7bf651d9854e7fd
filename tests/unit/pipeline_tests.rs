// Image pipeline unit tests against the in-memory blob store

use async_trait::async_trait;
use bytes::Bytes;
use http::Uri;
use image::{DynamicImage, GenericImageView, ImageOutputFormat, Rgb, RgbImage};
use mediaport::imaging::{BackgroundColor, ImageSettings};
use mediaport::pipeline::{ImagePipeline, PipelineError, SourceAsset};
use mediaport::storage::{
    BlobStore, BlobUploader, CdnRewriter, InMemoryBlobStore, StorageError, UploadOptions,
};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

const BASE_URL: &str = "http://storage.local";

fn encode(width: u32, height: u32, format: ImageOutputFormat) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([200, 30, 30]));
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), format)
        .unwrap();
    buf
}

fn jpeg(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageOutputFormat::Jpeg(90))
}

fn setup() -> (Arc<InMemoryBlobStore>, ImagePipeline) {
    let store = Arc::new(InMemoryBlobStore::new(BASE_URL));
    let pipeline = ImagePipeline::new(BlobUploader::new(store.clone()));
    (store, pipeline)
}

#[tokio::test]
async fn test_save_image_stores_one_derivative_per_width_in_order() {
    let (store, pipeline) = setup();
    let asset = SourceAsset::new("Team Photo.jpg", "image/jpeg", jpeg(800, 600));

    let stored = pipeline
        .save_image("photos", asset, &ImageSettings::new(vec![640, 320, 100]))
        .await
        .unwrap();

    assert_eq!(stored.len(), 3);
    for (asset, width) in stored.iter().zip([640u32, 320, 100]) {
        assert!(asset.key.starts_with(&format!("team-photo-{}-", width)));
        assert!(asset.key.ends_with(".jpg"));
        assert_eq!(asset.url(), format!("{}/photos/{}", BASE_URL, asset.key));

        let object = store.get("photos", &asset.key).await.unwrap();
        assert_eq!(object.content_type, "image/jpeg");
        let decoded = image::load_from_memory(&object.body).unwrap();
        assert_eq!(decoded.width(), width);
        assert_eq!(decoded.height(), width * 3 / 4);
    }
    assert_eq!(store.len().await, 3);
}

#[tokio::test]
async fn test_png_source_stays_png() {
    let (store, pipeline) = setup();
    let asset = SourceAsset::new("logo.png", "image/png", encode(50, 100, ImageOutputFormat::Png));

    let stored = pipeline
        .save_image("brand", asset, &ImageSettings::new(vec![40]))
        .await
        .unwrap();

    let object = store.get("brand", &stored[0].key).await.unwrap();
    assert_eq!(object.content_type, "image/png");
    let decoded = image::load_from_memory(&object.body).unwrap();
    assert_eq!(decoded.dimensions(), (20, 40));
}

#[tokio::test]
async fn test_force_square_pads_onto_background() {
    let (store, pipeline) = setup();
    let asset = SourceAsset::new("wide.jpg", "image/jpeg", jpeg(200, 100));
    let settings = ImageSettings::new(vec![64]).square(BackgroundColor::WHITE);

    let stored = pipeline.save_image("c", asset, &settings).await.unwrap();

    let object = store.get("c", &stored[0].key).await.unwrap();
    let decoded = image::load_from_memory(&object.body).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (64, 64));
    let corner = decoded.get_pixel(0, 0);
    assert!(corner.0.iter().all(|&c| c > 240), "corner {:?}", corner);
    let center = decoded.get_pixel(32, 32);
    assert!(center.0[0] > 150 && center.0[1] < 80, "center {:?}", center);
}

#[tokio::test]
async fn test_corrupt_image_uploads_nothing() {
    let (store, pipeline) = setup();
    let asset = SourceAsset::new("broken.jpg", "image/jpeg", b"definitely not an image".to_vec());

    let err = pipeline
        .save_image("c", asset, &ImageSettings::new(vec![100, 50]))
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Image(_)));
    assert_eq!(store.put_calls(), 0);
}

#[tokio::test]
async fn test_partial_upload_failure_rolls_back() {
    let store = Arc::new(InMemoryBlobStore::new(BASE_URL).failing_uploads_containing("-50-"));
    let pipeline = ImagePipeline::new(BlobUploader::new(store.clone()));
    let asset = SourceAsset::new("a.jpg", "image/jpeg", jpeg(300, 300));

    let err = pipeline
        .save_image("c", asset, &ImageSettings::new(vec![200, 50, 100]))
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Storage(StorageError::Upload { .. })));
    assert_eq!(store.put_calls(), 3);
    assert_eq!(store.delete_calls(), 3);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_cancelled_before_start_stores_nothing() {
    let (store, pipeline) = setup();
    let token = CancellationToken::new();
    token.cancel();

    let err = pipeline
        .save_image_with_cancellation(
            "c",
            SourceAsset::new("a.jpg", "image/jpeg", jpeg(64, 64)),
            &ImageSettings::new(vec![32]),
            &token,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Cancelled));
    assert!(store.is_empty().await);
}

/// Store whose uploads for `stalled_marker` keys land in the backend but never
/// acknowledge; every other upload completes and signals `first_stored`
struct StallingStore {
    inner: InMemoryBlobStore,
    stalled_marker: &'static str,
    first_stored: Notify,
}

#[async_trait]
impl BlobStore for StallingStore {
    async fn put(
        &self,
        container: &str,
        key: &str,
        body: Bytes,
        options: &UploadOptions,
    ) -> Result<(), StorageError> {
        self.inner.put(container, key, body, options).await?;
        if key.contains(self.stalled_marker) {
            tokio::time::sleep(Duration::from_secs(60)).await;
        } else {
            self.first_stored.notify_one();
        }
        Ok(())
    }

    async fn delete(&self, container: &str, key: &str) -> Result<(), StorageError> {
        self.inner.delete(container, key).await
    }

    fn object_url(&self, container: &str, key: &str) -> Result<Uri, StorageError> {
        self.inner.object_url(container, key)
    }
}

#[tokio::test]
async fn test_cancel_during_upload_leaves_nothing_behind() {
    let store = Arc::new(StallingStore {
        inner: InMemoryBlobStore::new(BASE_URL),
        stalled_marker: "-100-",
        first_stored: Notify::new(),
    });
    let pipeline = ImagePipeline::new(BlobUploader::new(store.clone()));
    let token = CancellationToken::new();

    let canceller = {
        let store = store.clone();
        let token = token.clone();
        tokio::spawn(async move {
            store.first_stored.notified().await;
            token.cancel();
        })
    };

    let err = pipeline
        .save_image_with_cancellation(
            "c",
            SourceAsset::new("a.jpg", "image/jpeg", jpeg(300, 300)),
            &ImageSettings::new(vec![200, 100]),
            &token,
        )
        .await
        .unwrap_err();
    canceller.await.unwrap();

    assert!(matches!(err, PipelineError::Cancelled));
    assert_eq!(store.inner.put_calls(), 2);
    assert!(store.inner.is_empty().await);
}

#[tokio::test]
async fn test_cdn_host_rewrites_returned_urls() {
    let store = Arc::new(InMemoryBlobStore::new("http://origin.internal:9000"));
    let uploader =
        BlobUploader::new(store).with_cdn(CdnRewriter::new("cdn.example.com").unwrap());
    let pipeline = ImagePipeline::new(uploader);

    let stored = pipeline
        .save_file(
            "docs",
            SourceAsset::new("Guide.pdf", "application/pdf", Bytes::from_static(b"%PDF-1.4")),
        )
        .await
        .unwrap();

    assert_eq!(
        stored.url(),
        format!("https://cdn.example.com/docs/{}", stored.key)
    );
}

#[tokio::test]
async fn test_save_file_keeps_bytes_and_content_type() {
    let (store, pipeline) = setup();
    let body = b"col1,col2\n1,2\n".to_vec();

    let stored = pipeline
        .save_file("exports", SourceAsset::new("../Q3 Report.csv", "text/csv", body.clone()))
        .await
        .unwrap();

    assert!(stored.key.starts_with("q3-report-"));
    let object = store.get("exports", &stored.key).await.unwrap();
    assert_eq!(object.body.as_ref(), body.as_slice());
    assert_eq!(object.content_type, "text/csv");
    assert_eq!(object.cache_control.to_header_value(), "public, max-age=31536000");
}

#[tokio::test]
async fn test_source_asset_from_reader() {
    let data = jpeg(10, 10);
    let asset = SourceAsset::from_reader("r.jpg", "image/jpeg", Cursor::new(data.clone()))
        .await
        .unwrap();
    assert_eq!(asset.bytes().as_ref(), data.as_slice());
}

#[tokio::test]
async fn test_delete_file_removes_object() {
    let (store, pipeline) = setup();
    let stored = pipeline
        .save_file("c", SourceAsset::new("x.txt", "text/plain", b"x".to_vec()))
        .await
        .unwrap();

    pipeline.delete_file("c", Some(&stored.key)).await.unwrap();
    assert!(store.get("c", &stored.key).await.is_none());
}

#[tokio::test]
async fn test_delete_blank_key_is_noop() {
    let (store, pipeline) = setup();
    pipeline.delete_file("c", Some("  ")).await.unwrap();
    pipeline.delete_file("c", None).await.unwrap();
    assert_eq!(store.delete_calls(), 0);
}

#[tokio::test]
async fn test_unconfigured_pipeline_fails_on_use() {
    let pipeline = ImagePipeline::unconfigured();
    let err = pipeline
        .save_file("c", SourceAsset::new("x.txt", "text/plain", b"x".to_vec()))
        .await
        .unwrap_err();
    assert!(err.is_not_configured());
}
