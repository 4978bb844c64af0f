//! Cluster-backed metrics source

use super::discovery::{check_health, find_exporter, proxy_base};
use super::{MetricsSource, ACCEPT_PROTOBUF};
use crate::config::Settings;
use crate::error::{KubestateError, Result};
use async_trait::async_trait;
use http::header::ACCEPT;
use http::Request;
use hyper::Body;
use k8s_openapi::api::core::v1::Service;
use kube::api::{Api, ListParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Proxied access to a verified exporter
pub struct ExporterClient {
    client: Client,
    base: String,
    metrics_path: String,
    timeout: Duration,
}

impl ExporterClient {
    /// Load credentials, locate the exporter and probe its health.
    pub async fn connect(settings: &Settings) -> Result<Self> {
        let kubeconfig_path = settings.kubeconfig_path()?;
        debug!(path = %kubeconfig_path.display(), "Loading kubeconfig");

        let kubeconfig = Kubeconfig::read_from(&kubeconfig_path).map_err(|e| {
            KubestateError::config_with(
                format!("failed to read kubeconfig {}", kubeconfig_path.display()),
                e,
            )
        })?;
        let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .map_err(|e| KubestateError::config_with("invalid kubeconfig", e))?;
        let client = Client::try_from(config).map_err(KubestateError::Client)?;

        let timeout = settings.request_timeout();
        let exporter = &settings.exporter;

        let list_path = format!("/api/v1/namespaces/{}/services", exporter.namespace);
        let services: Api<Service> = Api::namespaced(client.clone(), &exporter.namespace);
        let listed = bounded(timeout, &list_path, services.list(&ListParams::default()))
            .await?
            .map_err(|e| KubestateError::transport(list_path.as_str(), e))?;
        debug!(count = listed.items.len(), namespace = %exporter.namespace, "Listed services");

        let service = find_exporter(&listed.items, &exporter.service).ok_or_else(|| {
            KubestateError::ServiceNotFound {
                service: exporter.service.clone(),
                namespace: exporter.namespace.clone(),
            }
        })?;

        let gate = Self {
            client,
            base: proxy_base(service, exporter),
            metrics_path: exporter.metrics_path.clone(),
            timeout,
        };

        let health = gate.get(&exporter.health_path, None).await?;
        check_health(&String::from_utf8_lossy(&health), &exporter.service)?;
        info!(base = %gate.base, "Exporter is healthy");

        Ok(gate)
    }

    /// Proxy path prefix of the exporter service
    pub fn base(&self) -> &str {
        &self.base
    }

    async fn get(&self, endpoint: &str, accept: Option<&str>) -> Result<Vec<u8>> {
        let path = format!("{}/{}", self.base, endpoint.trim_start_matches('/'));

        let mut builder = Request::get(path.as_str());
        if let Some(accept) = accept {
            builder = builder.header(ACCEPT, accept);
        }
        let request = builder
            .body(Body::empty())
            .map_err(|e| KubestateError::transport(path.as_str(), e))?;

        let path_ref = path.as_str();
        let bytes = bounded(self.timeout, path_ref, async move {
            let response = self
                .client
                .send(request)
                .await
                .map_err(|e| KubestateError::transport(path_ref, e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(KubestateError::transport(
                    path_ref,
                    format!("unexpected status {status}"),
                ));
            }

            hyper::body::to_bytes(response.into_body())
                .await
                .map_err(|e| KubestateError::transport(path_ref, e))
        })
        .await??;

        debug!(path = %path, bytes = bytes.len(), "Proxied request complete");
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl MetricsSource for ExporterClient {
    async fn fetch_text(&self) -> Result<String> {
        let body = self.get(&self.metrics_path, None).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    async fn fetch_encoded(&self) -> Result<Vec<u8>> {
        self.get(&self.metrics_path, Some(ACCEPT_PROTOBUF)).await
    }
}

/// Run `call` under the request timeout
async fn bounded<F, T>(timeout: Duration, path: &str, call: F) -> Result<T>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(timeout, call)
        .await
        .map_err(|_| KubestateError::Timeout {
            path: path.to_string(),
            secs: timeout.as_secs(),
        })
}
