//! Text and JSON rendering
//!
//! CPU prints in millicores, memory in mebibytes, load as a whole percent.

use crate::models::{DeploymentKey, DeploymentRow, NodeKey, NodeRow, PodKey, PodRow};
use crate::proto::{Metric, MetricFamily, MetricType};
use crate::rank::Ranked;
use crate::selector::Selector;
use tabled::{settings::Style, Table, Tabled};

const MEBIBYTE: f64 = 1_048_576.0;

/// Placeholder for a load that could not be computed
pub const NO_LOAD: &str = "-";

/// Name shown for the node bucket of unscheduled pods
pub const NO_NODE: &str = "<none>";

#[derive(Tabled)]
struct PodLine {
    #[tabled(rename = "Namespace")]
    namespace: String,
    #[tabled(rename = "Pod")]
    pod: String,
    #[tabled(rename = "Container")]
    container: String,
    #[tabled(rename = "CPU (Req / Lim)")]
    cpu: String,
    #[tabled(rename = "Memory (Req / Lim)")]
    memory: String,
    #[tabled(rename = "Node")]
    node: String,
    #[tabled(rename = "Load")]
    load: String,
}

#[derive(Tabled)]
struct NodeLine {
    #[tabled(rename = "Node")]
    node: String,
    #[tabled(rename = "CPU (Req / Lim / Cap)")]
    cpu: String,
    #[tabled(rename = "Memory (Req / Lim / Cap)")]
    memory: String,
    #[tabled(rename = "Load")]
    load: String,
}

#[derive(Tabled)]
struct DeploymentLine {
    #[tabled(rename = "Namespace")]
    namespace: String,
    #[tabled(rename = "Deployment")]
    deployment: String,
    #[tabled(rename = "Replicas (Req / Avail / Unavail)")]
    replicas: String,
}

#[derive(Tabled)]
struct FamilyLine {
    #[tabled(rename = "Type")]
    metric_type: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Help")]
    help: String,
}

#[derive(Tabled)]
struct SampleLine {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    metric_type: String,
    #[tabled(rename = "Labels")]
    labels: String,
    #[tabled(rename = "Value")]
    value: String,
}

pub fn format_millicores(cores: f64) -> String {
    format!("{:.0}m", cores * 1000.0)
}

pub fn format_mebibytes(bytes: f64) -> String {
    format!("{:.0}Mi", bytes / MEBIBYTE)
}

pub fn format_load(load: f64) -> String {
    if load.is_finite() {
        format!("{:.0}%", load * 100.0)
    } else {
        NO_LOAD.to_string()
    }
}

fn render<T: Tabled>(lines: Vec<T>) -> String {
    Table::new(lines).with(Style::blank()).to_string()
}

pub fn render_pods(ranked: &[Ranked<'_, PodKey, PodRow>]) -> String {
    let lines = ranked
        .iter()
        .map(|r| PodLine {
            namespace: r.key.namespace.clone(),
            pod: r.key.pod.clone(),
            container: r.key.container.clone(),
            cpu: format!(
                "({} / {})",
                format_millicores(r.row.resources.cpu_request),
                format_millicores(r.row.resources.cpu_limit)
            ),
            memory: format!(
                "({} / {})",
                format_mebibytes(r.row.resources.memory_request),
                format_mebibytes(r.row.resources.memory_limit)
            ),
            node: r.row.node.clone(),
            load: format_load(r.score),
        })
        .collect();
    render::<PodLine>(lines)
}

pub fn render_nodes(ranked: &[Ranked<'_, NodeKey, NodeRow>]) -> String {
    let lines = ranked
        .iter()
        .map(|r| {
            let resources = &r.row.resources;
            let capacity = &r.row.capacity;
            NodeLine {
                node: if r.key.is_empty() {
                    NO_NODE.to_string()
                } else {
                    r.key.clone()
                },
                cpu: format!(
                    "({} / {} / {})",
                    format_millicores(resources.cpu_request),
                    format_millicores(resources.cpu_limit),
                    format_millicores(capacity.cpu_capacity)
                ),
                memory: format!(
                    "({} / {} / {})",
                    format_mebibytes(resources.memory_request),
                    format_mebibytes(resources.memory_limit),
                    format_mebibytes(capacity.memory_capacity)
                ),
                load: format_load(r.score),
            }
        })
        .collect();
    render::<NodeLine>(lines)
}

pub fn render_deployments(ranked: &[Ranked<'_, DeploymentKey, DeploymentRow>]) -> String {
    let lines = ranked
        .iter()
        .map(|r| DeploymentLine {
            namespace: r.key.namespace.clone(),
            deployment: r.key.deployment.clone(),
            replicas: format!(
                "({:.0} / {:.0} / {:.0})",
                r.row.requested_replicas, r.row.available_replicas, r.row.unavailable_replicas
            ),
        })
        .collect();
    render::<DeploymentLine>(lines)
}

/// Type, name and help of every family
pub fn render_family_list(families: &[MetricFamily]) -> String {
    let lines = families
        .iter()
        .map(|family| FamilyLine {
            metric_type: family.metric_type().to_string(),
            name: family.name().to_string(),
            help: family.help().to_string(),
        })
        .collect();
    render::<FamilyLine>(lines)
}

/// Families whose name the filter selects, in stream order
pub fn select_families<'a>(families: &'a [MetricFamily], filter: &Selector) -> Vec<&'a MetricFamily> {
    families
        .iter()
        .filter(|family| filter.matches(family.name()))
        .collect()
}

/// One JSON array of families; `[]` when nothing is selected
pub fn render_families_json(families: &[&MetricFamily]) -> serde_json::Result<String> {
    serde_json::to_string(families)
}

/// One line per sample of the given families within `namespace`
pub fn render_samples(families: &[&MetricFamily], namespace: &Selector) -> String {
    let lines = families
        .iter()
        .flat_map(|family| {
            family
                .metric
                .iter()
                .filter(|metric| namespace.matches(metric.label_value("namespace")))
                .map(move |metric| SampleLine {
                    name: family.name().to_string(),
                    metric_type: family.metric_type().to_string(),
                    labels: format_labels(metric),
                    value: describe_value(family.metric_type(), metric),
                })
        })
        .collect();
    render::<SampleLine>(lines)
}

fn format_labels(metric: &Metric) -> String {
    metric
        .label
        .iter()
        .map(|pair| format!("{}={:?}", pair.name(), pair.value()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Human-readable payload of one sample
pub fn describe_value(metric_type: MetricType, metric: &Metric) -> String {
    match (metric_type, &metric.summary, &metric.histogram) {
        (MetricType::Summary, Some(summary), _) => {
            let mut parts = vec![
                format!("count={}", summary.sample_count()),
                format!("sum={}", summary.sample_sum()),
            ];
            parts.extend(
                summary
                    .quantile
                    .iter()
                    .map(|q| format!("q{}={}", q.quantile(), q.value())),
            );
            parts.join(" ")
        }
        (MetricType::Histogram, _, Some(histogram)) => format!(
            "count={} sum={} buckets={}",
            histogram.sample_count(),
            histogram.sample_sum(),
            histogram.bucket.len()
        ),
        _ => metric.scalar_value().to_string(),
    }
}
