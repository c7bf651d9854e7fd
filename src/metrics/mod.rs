// Pipeline Prometheus metrics
//
// Counters for rendered derivatives, uploads, deletes and sent emails, plus a
// histogram of per-derivative render time. Registered once in the default
// registry; `export_text` renders everything gathered from it.

use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Encoder, Histogram,
    IntCounter, IntCounterVec, TextEncoder,
};
use std::sync::OnceLock;
use std::time::Duration;

/// Global metrics for the media pipeline
pub struct PipelineMetrics {
    /// Derivatives rendered, by output format
    pub derivatives_rendered: IntCounterVec,

    /// Successful uploads
    pub uploads_succeeded: IntCounter,

    /// Failed uploads
    pub uploads_failed: IntCounter,

    /// Total bytes handed to the blob store
    pub uploaded_bytes: IntCounter,

    /// Deletes reaching the blob store
    pub deletes_succeeded: IntCounter,

    /// Deletes rejected by the blob store
    pub deletes_failed: IntCounter,

    /// Emails by outcome (sent, failed, skipped)
    pub emails: IntCounterVec,

    /// Render duration histogram (in seconds)
    pub render_duration: Histogram,
}

/// Global singleton instance of metrics
static METRICS: OnceLock<PipelineMetrics> = OnceLock::new();

impl PipelineMetrics {
    /// Initialize and return the global metrics instance
    ///
    /// Subsequent calls return the same instance.
    pub fn global() -> &'static Self {
        METRICS.get_or_init(|| {
            let derivatives_rendered = register_int_counter_vec!(
                "mediaport_derivatives_rendered_total",
                "Total number of image derivatives rendered",
                &["format"]
            )
            .expect("Failed to register derivatives_rendered_total metric");

            let uploads = register_int_counter_vec!(
                "mediaport_uploads_total",
                "Total number of blob uploads by outcome",
                &["outcome"] // success, error
            )
            .expect("Failed to register uploads_total metric");

            let uploaded_bytes = register_int_counter!(
                "mediaport_uploaded_bytes_total",
                "Total number of bytes uploaded to blob storage"
            )
            .expect("Failed to register uploaded_bytes_total metric");

            let deletes = register_int_counter_vec!(
                "mediaport_deletes_total",
                "Total number of blob deletes by outcome",
                &["outcome"]
            )
            .expect("Failed to register deletes_total metric");

            let emails = register_int_counter_vec!(
                "mediaport_emails_total",
                "Total number of emails by outcome",
                &["outcome"] // sent, failed, skipped
            )
            .expect("Failed to register emails_total metric");

            let render_duration = register_histogram!(
                "mediaport_render_duration_seconds",
                "Duration of a single derivative render in seconds",
                vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0] // 1ms to 5s
            )
            .expect("Failed to register render_duration_seconds metric");

            PipelineMetrics {
                derivatives_rendered,
                uploads_succeeded: uploads.with_label_values(&["success"]),
                uploads_failed: uploads.with_label_values(&["error"]),
                uploaded_bytes,
                deletes_succeeded: deletes.with_label_values(&["success"]),
                deletes_failed: deletes.with_label_values(&["error"]),
                emails,
                render_duration,
            }
        })
    }

    pub fn record_render(&self, format: &str, elapsed: Duration) {
        self.derivatives_rendered
            .with_label_values(&[format])
            .inc();
        self.render_duration.observe(elapsed.as_secs_f64());
    }

    pub fn record_upload(&self, success: bool, bytes: usize) {
        if success {
            self.uploads_succeeded.inc();
            self.uploaded_bytes.inc_by(bytes as u64);
        } else {
            self.uploads_failed.inc();
        }
    }

    pub fn record_delete(&self, success: bool) {
        if success {
            self.deletes_succeeded.inc();
        } else {
            self.deletes_failed.inc();
        }
    }

    pub fn record_email(&self, outcome: &str) {
        self.emails.with_label_values(&[outcome]).inc();
    }
}

/// Render the default registry in Prometheus text exposition format
pub fn export_text() -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buffer) {
        tracing::warn!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
