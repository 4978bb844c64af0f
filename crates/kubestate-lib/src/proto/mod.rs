//! Prometheus client data model (`io.prometheus.client`)
//!
//! Hand-declared prost messages matching the upstream `metrics.proto` (proto2),
//! so no protoc step is needed to decode the exporter's delimited stream.
//! The same structs serialize to JSON for `get --output json`.

use prost::{Enumeration, Message};
use serde::Serialize;
use std::fmt;

#[derive(Clone, PartialEq, Message, Serialize)]
pub struct LabelPair {
    #[prost(string, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[prost(string, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Enumeration)]
#[repr(i32)]
pub enum MetricType {
    Counter = 0,
    Gauge = 1,
    Summary = 2,
    Untyped = 3,
    Histogram = 4,
    GaugeHistogram = 5,
}

impl MetricType {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            MetricType::Counter => "COUNTER",
            MetricType::Gauge => "GAUGE",
            MetricType::Summary => "SUMMARY",
            MetricType::Untyped => "UNTYPED",
            MetricType::Histogram => "HISTOGRAM",
            MetricType::GaugeHistogram => "GAUGE_HISTOGRAM",
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str_name())
    }
}

#[derive(Clone, PartialEq, Message, Serialize)]
pub struct Gauge {
    #[prost(double, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

#[derive(Clone, PartialEq, Message, Serialize)]
pub struct Counter {
    #[prost(double, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

#[derive(Clone, PartialEq, Message, Serialize)]
pub struct Quantile {
    #[prost(double, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantile: Option<f64>,
    #[prost(double, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

#[derive(Clone, PartialEq, Message, Serialize)]
pub struct Summary {
    #[prost(uint64, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_count: Option<u64>,
    #[prost(double, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_sum: Option<f64>,
    #[prost(message, repeated, tag = "3")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub quantile: Vec<Quantile>,
}

#[derive(Clone, PartialEq, Message, Serialize)]
pub struct Untyped {
    #[prost(double, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

#[derive(Clone, PartialEq, Message, Serialize)]
pub struct Bucket {
    #[prost(uint64, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cumulative_count: Option<u64>,
    #[prost(double, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<f64>,
}

#[derive(Clone, PartialEq, Message, Serialize)]
pub struct Histogram {
    #[prost(uint64, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_count: Option<u64>,
    #[prost(double, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_sum: Option<f64>,
    #[prost(message, repeated, tag = "3")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bucket: Vec<Bucket>,
}

/// One sample of a family: its labels plus a type-specific payload
#[derive(Clone, PartialEq, Message, Serialize)]
pub struct Metric {
    #[prost(message, repeated, tag = "1")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub label: Vec<LabelPair>,
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gauge: Option<Gauge>,
    #[prost(message, optional, tag = "3")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter: Option<Counter>,
    #[prost(message, optional, tag = "4")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    #[prost(message, optional, tag = "5")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub untyped: Option<Untyped>,
    #[prost(int64, optional, tag = "6")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<i64>,
    #[prost(message, optional, tag = "7")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<Histogram>,
}

impl Metric {
    /// Value of the label `name`, or "" when the sample does not carry it
    pub fn label_value(&self, name: &str) -> &str {
        self.label
            .iter()
            .find(|pair| pair.name() == name)
            .map(|pair| pair.value())
            .unwrap_or_default()
    }

    /// Scalar payload: gauge, then counter, then untyped; 0 when none is set
    pub fn scalar_value(&self) -> f64 {
        if let Some(gauge) = &self.gauge {
            gauge.value()
        } else if let Some(counter) = &self.counter {
            counter.value()
        } else if let Some(untyped) = &self.untyped {
            untyped.value()
        } else {
            0.0
        }
    }
}

/// A named group of samples sharing one type and help string
#[derive(Clone, PartialEq, Message, Serialize)]
pub struct MetricFamily {
    #[prost(string, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[prost(string, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[prost(enumeration = "MetricType", optional, tag = "3")]
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub metric_type: Option<i32>,
    #[prost(message, repeated, tag = "4")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metric: Vec<Metric>,
}
