// End-to-end tests against LocalStack S3 using testcontainers

use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use mediaport::config::StorageConfig;
use mediaport::imaging::ImageSettings;
use mediaport::pipeline::{ImagePipeline, SourceAsset};
use std::io::Cursor;
use std::sync::Once;
use testcontainers::{clients::Cli, RunnableImage};
use testcontainers_modules::localstack::LocalStack;

const BUCKET: &str = "mediaport-test";

static INIT: Once = Once::new();

fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("mediaport=debug")
            .with_test_writer()
            .try_init();
    });
}

fn storage_config(endpoint: &str) -> StorageConfig {
    StorageConfig {
        endpoint: Some(endpoint.to_string()),
        access_key: Some("test".into()),
        secret_key: Some("test".into()),
        ..Default::default()
    }
}

async fn s3_client(endpoint: &str) -> aws_sdk_s3::Client {
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .endpoint_url(endpoint)
        .region(aws_config::Region::new("us-east-1"))
        .credentials_provider(aws_credential_types::Credentials::new(
            "test", "test", None, None, "test",
        ))
        .load()
        .await;
    let s3_config = aws_sdk_s3::config::Builder::from(&config)
        .force_path_style(true)
        .build();
    aws_sdk_s3::Client::from_conf(s3_config)
}

fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([10, 120, 200])))
        .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Jpeg(90))
        .unwrap();
    buf
}

#[test]
#[ignore] // Requires Docker - run with: cargo test --test integration_tests -- --ignored
fn test_save_image_uploads_derivatives_to_s3() {
    init_logging();

    let docker = Cli::default();
    let localstack_image =
        RunnableImage::from(LocalStack::default()).with_env_var(("SERVICES", "s3"));
    let container = docker.run(localstack_image);
    let endpoint = format!("http://127.0.0.1:{}", container.get_host_port_ipv4(4566));

    tokio_test::block_on(async {
        let client = s3_client(&endpoint).await;
        client.create_bucket().bucket(BUCKET).send().await.unwrap();

        let pipeline = ImagePipeline::from_config(Some(&storage_config(&endpoint)))
            .await
            .unwrap();
        let stored = pipeline
            .save_image(
                BUCKET,
                SourceAsset::new("Product Shot.jpg", "image/jpeg", jpeg(400, 200)),
                &ImageSettings::new(vec![200, 100]),
            )
            .await
            .unwrap();

        assert_eq!(stored.len(), 2);
        for asset in &stored {
            assert_eq!(asset.url(), format!("{}/{}/{}", endpoint, BUCKET, asset.key));

            let object = client
                .get_object()
                .bucket(BUCKET)
                .key(&asset.key)
                .send()
                .await
                .unwrap();
            assert_eq!(object.content_type(), Some("image/jpeg"));
            assert_eq!(object.cache_control(), Some("public, max-age=31536000"));
        }
    });
}

#[test]
#[ignore] // Requires Docker - run with: cargo test --test integration_tests -- --ignored
fn test_delete_file_removes_object_from_s3() {
    init_logging();

    let docker = Cli::default();
    let localstack_image =
        RunnableImage::from(LocalStack::default()).with_env_var(("SERVICES", "s3"));
    let container = docker.run(localstack_image);
    let endpoint = format!("http://127.0.0.1:{}", container.get_host_port_ipv4(4566));

    tokio_test::block_on(async {
        let client = s3_client(&endpoint).await;
        client.create_bucket().bucket(BUCKET).send().await.unwrap();

        let pipeline = ImagePipeline::from_config(Some(&storage_config(&endpoint)))
            .await
            .unwrap();
        let stored = pipeline
            .save_file(
                BUCKET,
                SourceAsset::new("notes.txt", "text/plain", b"hello".to_vec()),
            )
            .await
            .unwrap();

        let head = client.head_object().bucket(BUCKET).key(&stored.key).send().await;
        assert!(head.is_ok());

        pipeline.delete_file(BUCKET, Some(&stored.key)).await.unwrap();

        let head = client.head_object().bucket(BUCKET).key(&stored.key).send().await;
        assert!(head.is_err());

        // Deleting again is still a success
        pipeline.delete_file(BUCKET, Some(&stored.key)).await.unwrap();
    });
}
