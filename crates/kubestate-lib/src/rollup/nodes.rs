//! Per-node rollup: requests of the pods scheduled on each node

use super::routes::{resolve_resource, route, RollupKind, Target};
use super::Rollup;
use crate::models::{NodeKey, NodeRow};
use crate::proto::MetricFamily;
use crate::selector::Selector;
use tracing::debug;

/// Nodes known only from capacity samples still get a row; container
/// samples without a `node` label sum into the row named "".
pub fn rollup_nodes(families: &[MetricFamily], namespace: &Selector) -> Rollup<NodeKey, NodeRow> {
    let mut nodes: Rollup<NodeKey, NodeRow> = Rollup::new();

    for family in families {
        let Some(route) = route(family.name()) else {
            continue;
        };
        if route.kind == RollupKind::Deployment {
            continue;
        }
        debug!(family = route.family, samples = family.metric.len(), "Rolling up nodes");

        for metric in &family.metric {
            let node = metric.label_value("node");
            let value = metric.scalar_value();

            match route.target {
                Target::Resources(requirement, fixed) => {
                    if !namespace.matches(metric.label_value("namespace")) {
                        continue;
                    }
                    let Some(resource) = resolve_resource(fixed, metric.label_value("resource"))
                    else {
                        continue;
                    };
                    let row = nodes.entry(node.to_string());
                    route
                        .combine
                        .apply(row.resources.slot_mut(requirement, resource), value);
                }
                Target::Capacity(kind, fixed) => {
                    if node.is_empty() {
                        continue;
                    }
                    let Some(resource) = resolve_resource(fixed, metric.label_value("resource"))
                    else {
                        continue;
                    };
                    let row = nodes.entry(node.to_string());
                    route
                        .combine
                        .apply(row.capacity.slot_mut(kind, resource), value);
                }
                Target::Replicas(_) => {}
            }
        }
    }

    nodes
}
