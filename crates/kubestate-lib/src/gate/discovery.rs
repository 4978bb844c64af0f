//! Exporter lookup and health evaluation

use crate::config::ExporterSettings;
use crate::error::{KubestateError, Result};
use k8s_openapi::api::core::v1::Service;

/// The only health body accepted
pub const HEALTHY_BODY: &str = "ok";

/// Exact name match among the listed services
pub fn find_exporter<'a>(services: &'a [Service], name: &str) -> Option<&'a Service> {
    services
        .iter()
        .find(|service| service.metadata.name.as_deref() == Some(name))
}

/// API server path that proxies to the service's first port
pub fn proxy_base(service: &Service, exporter: &ExporterSettings) -> String {
    let name = service
        .metadata
        .name
        .as_deref()
        .unwrap_or(exporter.service.as_str());
    let namespace = service
        .metadata
        .namespace
        .as_deref()
        .unwrap_or(exporter.namespace.as_str());

    let port = service
        .spec
        .as_ref()
        .and_then(|spec| spec.ports.as_ref())
        .and_then(|ports| ports.first())
        .map(|port| match port.name.as_deref() {
            Some(port_name) if !port_name.is_empty() => port_name.to_string(),
            _ => port.port.to_string(),
        });

    match port {
        Some(port) => format!("/api/v1/namespaces/{namespace}/services/{name}:{port}/proxy"),
        None => format!("/api/v1/namespaces/{namespace}/services/{name}/proxy"),
    }
}

pub fn check_health(body: &str, service: &str) -> Result<()> {
    if body == HEALTHY_BODY {
        Ok(())
    } else {
        Err(KubestateError::UnhealthyService {
            service: service.to_string(),
            body: body.to_string(),
        })
    }
}
