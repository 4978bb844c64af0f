//! Access to kube-state-metrics through the cluster API proxy
//!
//! Connecting verifies that the exporter service exists and answers its
//! health probe before any metrics request is made. Everything downstream
//! only sees a [`MetricsSource`].

mod client;
mod discovery;

pub use client::ExporterClient;
pub use discovery::{check_health, find_exporter, proxy_base, HEALTHY_BODY};

use crate::decoder::decode_families;
use crate::error::Result;
use crate::proto::MetricFamily;
use async_trait::async_trait;
use tracing::info;

/// Accept header for the length-delimited protobuf exposition, text as fallback
pub const ACCEPT_PROTOBUF: &str = "application/vnd.google.protobuf;proto=io.prometheus.client.MetricFamily;encoding=delimited;q=0.7,text/plain;version=0.0.4;q=0.3";

/// One metrics endpoint, either encoding
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Text exposition body, untouched
    async fn fetch_text(&self) -> Result<String>;

    /// Length-delimited `MetricFamily` records
    async fn fetch_encoded(&self) -> Result<Vec<u8>>;
}

/// Fetch and decode every family. Nothing is returned if any record is bad.
pub async fn fetch_families(source: &dyn MetricsSource) -> Result<Vec<MetricFamily>> {
    let payload = source.fetch_encoded().await?;
    let families = decode_families(&payload)?;
    info!(
        bytes = payload.len(),
        families = families.len(),
        "Decoded metric families"
    );
    Ok(families)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::encode_families;
    use crate::error::KubestateError;
    use crate::testing::{family, gauge};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves a fixed payload
    struct FixtureSource {
        text: String,
        encoded: Vec<u8>,
        calls: AtomicUsize,
    }

    impl FixtureSource {
        fn new(encoded: Vec<u8>) -> Self {
            Self {
                text: "up 1\n".to_string(),
                encoded,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MetricsSource for FixtureSource {
        async fn fetch_text(&self) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.text.clone())
        }

        async fn fetch_encoded(&self) -> Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.encoded.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl MetricsSource for FailingSource {
        async fn fetch_text(&self) -> Result<String> {
            Err(KubestateError::transport("/metrics", "connection reset"))
        }

        async fn fetch_encoded(&self) -> Result<Vec<u8>> {
            Err(KubestateError::transport("/metrics", "connection reset"))
        }
    }

    #[test]
    fn test_accept_header_prefers_protobuf() {
        let (protobuf, text) = ACCEPT_PROTOBUF.split_once(',').unwrap();
        assert!(protobuf.contains("proto=io.prometheus.client.MetricFamily"));
        assert!(protobuf.contains("encoding=delimited"));
        assert!(protobuf.ends_with("q=0.7"));
        assert!(text.starts_with("text/plain;version=0.0.4"));
        assert!(text.ends_with("q=0.3"));
    }

    #[tokio::test]
    async fn test_fetch_families_from_fixture() {
        let families = vec![
            family("kube_node_info", vec![gauge(&[("node", "n1")], 1.0)]),
            family("kube_pod_info", vec![gauge(&[("pod", "p1")], 1.0)]),
        ];
        let source = FixtureSource::new(encode_families(&families));

        let decoded = fetch_families(&source).await.unwrap();
        assert_eq!(decoded, families);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.fetch_text().await.unwrap(), "up 1\n");
    }

    #[tokio::test]
    async fn test_fetch_families_is_all_or_nothing() {
        let families = vec![
            family("kube_node_info", vec![gauge(&[("node", "n1")], 1.0)]),
            family("kube_pod_info", vec![gauge(&[("pod", "p1")], 1.0)]),
        ];
        let mut payload = encode_families(&families);
        payload.truncate(payload.len() - 3);

        let err = fetch_families(&FixtureSource::new(payload)).await.unwrap_err();
        assert!(matches!(err, KubestateError::Decode { index: 1, .. }));
    }

    #[tokio::test]
    async fn test_fetch_families_passes_transport_errors() {
        let err = fetch_families(&FailingSource).await.unwrap_err();
        assert!(matches!(err, KubestateError::Transport { .. }));
    }
}
