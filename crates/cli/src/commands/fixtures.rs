//! A small cluster served from memory

use async_trait::async_trait;
use kubestate_lib::decoder::encode_families;
use kubestate_lib::proto::{Gauge, LabelPair, Metric, MetricFamily, MetricType};
use kubestate_lib::{MetricsSource, Result};

pub struct FixtureSource {
    pub text: String,
    encoded: Vec<u8>,
}

impl FixtureSource {
    pub fn new(families: Vec<MetricFamily>) -> Self {
        Self {
            text: to_text(&families),
            encoded: encode_families(&families),
        }
    }
}

#[async_trait]
impl MetricsSource for FixtureSource {
    async fn fetch_text(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    async fn fetch_encoded(&self) -> Result<Vec<u8>> {
        Ok(self.encoded.clone())
    }
}

fn to_text(families: &[MetricFamily]) -> String {
    let mut out = String::new();
    for family in families {
        out.push_str(&format!("# HELP {} {}\n", family.name(), family.help()));
        out.push_str(&format!("# TYPE {} gauge\n", family.name()));
        for metric in &family.metric {
            let labels: Vec<String> = metric
                .label
                .iter()
                .map(|pair| format!("{}=\"{}\"", pair.name(), pair.value()))
                .collect();
            out.push_str(&format!(
                "{}{{{}}} {}\n",
                family.name(),
                labels.join(","),
                metric.scalar_value()
            ));
        }
    }
    out
}

fn gauge(labels: &[(&str, &str)], value: f64) -> Metric {
    Metric {
        label: labels
            .iter()
            .map(|(name, value)| LabelPair {
                name: Some(name.to_string()),
                value: Some(value.to_string()),
            })
            .collect(),
        gauge: Some(Gauge { value: Some(value) }),
        ..Default::default()
    }
}

fn family(name: &str, help: &str, metric: Vec<Metric>) -> MetricFamily {
    MetricFamily {
        name: Some(name.to_string()),
        help: Some(help.to_string()),
        metric_type: Some(MetricType::Gauge as i32),
        metric,
    }
}

fn container(ns: &str, pod: &str, resource: &str) -> [(&'static str, String); 5] {
    [
        ("namespace", ns.to_string()),
        ("pod", pod.to_string()),
        ("container", "app".to_string()),
        ("node", "n1".to_string()),
        ("resource", resource.to_string()),
    ]
}

fn container_gauge(ns: &str, pod: &str, resource: &str, value: f64) -> Metric {
    let labels = container(ns, pod, resource);
    let borrowed: Vec<(&str, &str)> = labels.iter().map(|(k, v)| (*k, v.as_str())).collect();
    gauge(&borrowed, value)
}

/// Pods p1 (namespace a) and p2 (namespace b) on node n1, one deployment
pub fn cluster() -> Vec<MetricFamily> {
    vec![
        family(
            "kube_pod_container_resource_requests",
            "The number of requested request resource by a container.",
            vec![
                container_gauge("a", "p1", "cpu", 0.5),
                container_gauge("a", "p1", "memory", 104_857_600.0),
                container_gauge("b", "p2", "cpu", 0.5),
                container_gauge("b", "p2", "memory", 1_572_864_000.0),
            ],
        ),
        family(
            "kube_pod_container_resource_limits",
            "The number of requested limit resource by a container.",
            vec![
                container_gauge("a", "p1", "cpu", 1.0),
                container_gauge("a", "p1", "memory", 209_715_200.0),
            ],
        ),
        family(
            "kube_node_status_allocatable",
            "Allocatable resources of the node",
            vec![
                gauge(&[("node", "n1"), ("resource", "cpu")], 2.0),
                gauge(&[("node", "n1"), ("resource", "memory")], 2_097_152_000.0),
            ],
        ),
        family(
            "kube_deployment_spec_replicas",
            "Number of desired pods for a deployment.",
            vec![gauge(&[("namespace", "a"), ("deployment", "web")], 3.0)],
        ),
        family(
            "kube_deployment_status_replicas_available",
            "The number of available replicas per deployment.",
            vec![gauge(&[("namespace", "a"), ("deployment", "web")], 2.0)],
        ),
        family(
            "kube_deployment_status_replicas_unavailable",
            "The number of unavailable replicas per deployment.",
            vec![gauge(&[("namespace", "a"), ("deployment", "web")], 1.0)],
        ),
    ]
}
