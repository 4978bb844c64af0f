//! Per-deployment replica rollup

use super::routes::{route, RollupKind, Target};
use super::Rollup;
use crate::models::{DeploymentKey, DeploymentRow};
use crate::proto::MetricFamily;
use crate::selector::Selector;

pub fn rollup_deployments(
    families: &[MetricFamily],
    namespace: &Selector,
) -> Rollup<DeploymentKey, DeploymentRow> {
    let mut deployments: Rollup<DeploymentKey, DeploymentRow> = Rollup::new();

    for family in families {
        let Some(route) = route(family.name()) else {
            continue;
        };
        let (RollupKind::Deployment, Target::Replicas(field)) = (route.kind, route.target) else {
            continue;
        };

        for metric in &family.metric {
            let ns = metric.label_value("namespace");
            if !namespace.matches(ns) {
                continue;
            }
            let key = DeploymentKey::new(ns, metric.label_value("deployment"));
            let row = deployments.entry(key);
            route.combine.apply(row.slot_mut(field), metric.scalar_value());
        }
    }

    deployments
}
