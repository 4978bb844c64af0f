//! `top`: ranked resource reports

use anyhow::Result;
use kubestate_lib::rank::{rank_deployments, rank_nodes, rank_pods};
use kubestate_lib::report::{render_deployments, render_nodes, render_pods};
use kubestate_lib::rollup::{rollup_deployments, rollup_nodes, rollup_pods};
use kubestate_lib::{fetch_families, MetricsSource, Selector};

/// Containers by load on their node
pub async fn top_pods(source: &dyn MetricsSource, namespace: &Selector) -> Result<String> {
    let families = fetch_families(source).await?;
    let rollup = rollup_pods(&families, namespace);
    Ok(render_pods(&rank_pods(&rollup)))
}

/// Nodes by load from the requests scheduled on them
pub async fn top_nodes(source: &dyn MetricsSource, namespace: &Selector) -> Result<String> {
    let families = fetch_families(source).await?;
    let nodes = rollup_nodes(&families, namespace);
    Ok(render_nodes(&rank_nodes(&nodes)))
}

/// Deployments by requested replicas
pub async fn top_deployments(source: &dyn MetricsSource, namespace: &Selector) -> Result<String> {
    let families = fetch_families(source).await?;
    let deployments = rollup_deployments(&families, namespace);
    Ok(render_deployments(&rank_deployments(&deployments)))
}
