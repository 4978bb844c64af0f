//! Cluster resource reporting from kube-state-metrics
//!
//! This crate provides:
//! - A gate that finds and health-checks the exporter through the API proxy
//! - Decoding of the length-delimited protobuf exposition
//! - Pod, node and deployment rollups over the decoded families
//! - Ranking and table/JSON rendering of the rollups

pub mod config;
pub mod decoder;
pub mod error;
pub mod exposition;
pub mod gate;
pub mod models;
pub mod observability;
pub mod proto;
pub mod rank;
pub mod report;
pub mod rollup;
pub mod selector;

#[cfg(test)]
mod testing;

pub use config::{ExporterSettings, LogFormat, Settings};
pub use error::{KubestateError, Result};
pub use gate::{fetch_families, ExporterClient, MetricsSource};
pub use models::*;
pub use proto::{MetricFamily, MetricType};
pub use selector::Selector;
