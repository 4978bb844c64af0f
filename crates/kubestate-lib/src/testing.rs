//! Builders for metric families used across unit tests

use crate::proto::{Gauge, LabelPair, Metric, MetricFamily, MetricType};

pub(crate) fn gauge(labels: &[(&str, &str)], value: f64) -> Metric {
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

pub(crate) fn family(name: &str, metric: Vec<Metric>) -> MetricFamily {
    MetricFamily {
        name: Some(name.to_string()),
        help: Some(format!("{name} help")),
        metric_type: Some(MetricType::Gauge as i32),
        metric,
    }
}
