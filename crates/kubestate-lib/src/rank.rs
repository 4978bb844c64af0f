//! Ranking scores and ordering
//!
//! Load is the equally weighted average of requested cpu and memory as a
//! share of what the node can allocate. Without a positive allocatable
//! figure the load is NaN and the row sorts after every real score.

use crate::models::{
    DeploymentKey, DeploymentRow, NodeCapacity, NodeKey, NodeRow, PodKey, PodRow, ResourceTotals,
};
use crate::rollup::{PodRollup, Rollup};
use std::cmp::Ordering;

/// A row paired with its ranking score
#[derive(Debug)]
pub struct Ranked<'a, K, R> {
    pub key: &'a K,
    pub row: &'a R,
    pub score: f64,
}

pub fn load_score(resources: &ResourceTotals, capacity: Option<&NodeCapacity>) -> f64 {
    let Some(capacity) = capacity else {
        return f64::NAN;
    };
    if !(capacity.cpu_allocatable > 0.0 && capacity.memory_allocatable > 0.0) {
        return f64::NAN;
    }

    (resources.memory_request / capacity.memory_allocatable
        + resources.cpu_request / capacity.cpu_allocatable)
        / 2.0
}

/// Descending by score, NaN last
pub fn compare_scores(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}

/// Score every row and sort; ties keep first-seen order
pub fn rank_by<'a, K, R>(
    rows: impl Iterator<Item = (&'a K, &'a R)>,
    score: impl Fn(&K, &R) -> f64,
) -> Vec<Ranked<'a, K, R>>
where
    K: 'a,
    R: 'a,
{
    let mut ranked: Vec<Ranked<'a, K, R>> = rows
        .map(|(key, row)| Ranked {
            key,
            row,
            score: score(key, row),
        })
        .collect();
    ranked.sort_by(|a, b| compare_scores(a.score, b.score));
    ranked
}

pub fn rank_pods(rollup: &PodRollup) -> Vec<Ranked<'_, PodKey, PodRow>> {
    rank_by(rollup.pods.iter(), |_, row| {
        load_score(&row.resources, rollup.capacity_of(&row.node))
    })
}

pub fn rank_nodes(nodes: &Rollup<NodeKey, NodeRow>) -> Vec<Ranked<'_, NodeKey, NodeRow>> {
    rank_by(nodes.iter(), |_, row| {
        load_score(&row.resources, Some(&row.capacity))
    })
}

pub fn rank_deployments(
    deployments: &Rollup<DeploymentKey, DeploymentRow>,
) -> Vec<Ranked<'_, DeploymentKey, DeploymentRow>> {
    rank_by(deployments.iter(), |_, row| row.requested_replicas)
}
