//! Per-container rollup with the node capacity side table

use super::routes::{resolve_resource, route, RollupKind, Target};
use super::Rollup;
use crate::models::{NodeCapacity, NodeKey, PodKey, PodRow};
use crate::proto::MetricFamily;
use crate::selector::Selector;
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PodRollup {
    pub pods: Rollup<PodKey, PodRow>,
    /// Capacity per node, regardless of the namespace selector
    pub nodes: HashMap<NodeKey, NodeCapacity>,
}

impl PodRollup {
    pub fn capacity_of(&self, node: &str) -> Option<&NodeCapacity> {
        self.nodes.get(node)
    }
}

pub fn rollup_pods(families: &[MetricFamily], namespace: &Selector) -> PodRollup {
    let mut rollup = PodRollup::default();

    for family in families {
        let Some(route) = route(family.name()) else {
            continue;
        };
        if route.kind == RollupKind::Deployment {
            continue;
        }
        debug!(family = route.family, samples = family.metric.len(), "Rolling up pods");

        for metric in &family.metric {
            let value = metric.scalar_value();

            match route.target {
                Target::Resources(requirement, fixed) => {
                    let ns = metric.label_value("namespace");
                    if !namespace.matches(ns) {
                        continue;
                    }
                    let Some(resource) = resolve_resource(fixed, metric.label_value("resource"))
                    else {
                        continue;
                    };

                    let node = metric.label_value("node");
                    let key = PodKey::new(
                        ns,
                        metric.label_value("pod"),
                        metric.label_value("container"),
                    );
                    let row = rollup.pods.get_or_insert_with(key, || PodRow {
                        node: node.to_string(),
                        ..Default::default()
                    });
                    if row.node != node {
                        warn!(
                            namespace = ns,
                            pod = metric.label_value("pod"),
                            first_node = %row.node,
                            node,
                            "Container reported on more than one node, keeping the first"
                        );
                    }
                    route
                        .combine
                        .apply(row.resources.slot_mut(requirement, resource), value);
                }
                Target::Capacity(kind, fixed) => {
                    let node = metric.label_value("node");
                    if node.is_empty() {
                        continue;
                    }
                    let Some(resource) = resolve_resource(fixed, metric.label_value("resource"))
                    else {
                        continue;
                    };

                    let capacity = rollup.nodes.entry(node.to_string()).or_default();
                    route.combine.apply(capacity.slot_mut(kind, resource), value);
                }
                Target::Replicas(_) => {}
            }
        }
    }

    rollup
}
