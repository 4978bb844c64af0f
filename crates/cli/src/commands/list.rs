//! `list`: every family with its type and help

use anyhow::Result;
use kubestate_lib::report::render_family_list;
use kubestate_lib::{fetch_families, MetricsSource};

pub async fn list_families(source: &dyn MetricsSource) -> Result<String> {
    let families = fetch_families(source).await?;
    Ok(render_family_list(&families))
}
